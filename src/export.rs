//! Saving the current chart bitmap as `chart.png`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::viz::RenderedFrame;

/// File name every export is written under.
pub const EXPORT_FILE_NAME: &str = "chart.png";

/// Write `frame` as PNG to `dir/chart.png`, replacing any earlier export.
///
/// Without a rendered frame this is a silent no-op and returns `Ok(None)`.
pub fn export_png(frame: Option<&RenderedFrame>, dir: &Path) -> Result<Option<PathBuf>> {
    let Some(frame) = frame else {
        log::debug!("export requested before any chart was rendered; ignoring");
        return Ok(None);
    };
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, frame.to_png()?)?;
    log::info!(
        "exported {}x{} {:?} chart to {}",
        frame.width(),
        frame.height(),
        frame.kind,
        path.display()
    );
    Ok(Some(path))
}

/// The user's download folder, or the working directory when there is none.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn no_frame_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = export_png(None, dir.path()).unwrap();
        assert!(out.is_none());
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
    }
}
