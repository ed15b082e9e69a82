use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library. Rendering degradations (missing avatars,
/// unavailable fonts, length mismatches) are logged instead of returned.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid color {0:?}, expected rgba(r,g,b,a), rgb(r,g,b) or #rrggbb")]
    InvalidColor(String),

    #[error("{0}")]
    Invalid(String),

    #[error("drawing failed: {0}")]
    Draw(String),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;

/// Map any plotters error into [`ChartError::Draw`].
pub(crate) fn draw_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Draw(format!("{:?}", e))
}
