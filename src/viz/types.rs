//! Public types for the visualization module.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::scale::{CategoryScale, LinearScale, PlotArea};

/// Chart presentation. Toggled by the host; every change triggers a full re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Connected lines, categories touching the plot edges (default).
    #[default]
    Line,
    /// Grouped bars, one band per category.
    Bar,
}

impl ChartKind {
    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
        }
    }

    /// Whether categories get their own band (bars) instead of sitting on edges.
    pub fn offset_categories(self) -> bool {
        matches!(self, ChartKind::Bar)
    }
}

/// Pixel geometry of one render pass, kept for hit testing after the fact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub width: u32,
    pub height: u32,
    pub area: PlotArea,
    pub x_scale: CategoryScale,
    pub y_scale: LinearScale,
}

/// A finished chart bitmap (packed RGB8, row-major).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub kind: ChartKind,
    pub pixels: Vec<u8>,
    pub layout: FrameLayout,
}

impl RenderedFrame {
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    /// RGB triple at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let i = ((y * self.width() + x) * 3) as usize;
        self.pixels.get(i..i + 3).map(|p| [p[0], p[1], p[2]])
    }

    /// Encode as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        use image::ImageEncoder;
        use image::codecs::png::PngEncoder;

        let expected = (self.width() * self.height() * 3) as usize;
        if self.pixels.len() != expected {
            return Err(ChartError::Invalid(format!(
                "frame buffer holds {} bytes, expected {}",
                self.pixels.len(),
                expected
            )));
        }
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            &self.pixels,
            self.width(),
            self.height(),
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(out)
    }
}
