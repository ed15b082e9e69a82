//! Draw-time hooks that decorate the chart after the datasets are painted.
//!
//! Hooks receive everything they need through [`DrawFrame`] and paint through the
//! backend-neutral [`Painter`] trait; nothing is registered globally. The render
//! pipeline calls each hook once per pass, in the order they were supplied.

use image::RgbaImage;

use crate::config::Assets;
use crate::error::Result;
use crate::images::ImageCache;
use crate::models::{ChartData, Rgba};
use crate::scale::{CategoryScale, LinearScale, PlotArea};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub size_px: u32,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size_px: u32) -> Self {
        Self {
            size_px,
            bold: false,
        }
    }

    pub const fn bold(size_px: u32) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }
}

/// Drawing surface handed to hooks. Coordinates are root-surface pixels.
pub trait Painter {
    /// Draw `image` scaled to `diameter` and clipped to the circle of that
    /// diameter centered at `center`.
    fn draw_clipped_image(
        &mut self,
        center: (i32, i32),
        diameter: u32,
        image: &RgbaImage,
    ) -> Result<()>;

    fn stroke_circle(
        &mut self,
        center: (i32, i32),
        radius: u32,
        color: Rgba,
        width: u32,
    ) -> Result<()>;

    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: Rgba) -> Result<()>;

    fn fill_rect(&mut self, top_left: (i32, i32), size: (u32, u32), color: Rgba) -> Result<()>;

    /// Draw `text` centered (both axes) on `center`.
    fn fill_text(
        &mut self,
        text: &str,
        center: (i32, i32),
        font: &FontSpec,
        color: Rgba,
    ) -> Result<()>;

    /// Rendered width of `text` in pixels.
    fn measure_text(&self, text: &str, font: &FontSpec) -> u32;
}

/// Read-only inputs of one render pass.
pub struct DrawFrame<'a> {
    pub data: &'a ChartData,
    pub area: PlotArea,
    pub x_scale: &'a CategoryScale,
    pub y_scale: &'a LinearScale,
    pub assets: &'a Assets,
    pub images: &'a ImageCache,
}

/// A decoration painted after the base datasets.
pub trait DatasetsDrawHook {
    fn id(&self) -> &'static str;

    fn after_datasets_draw(&self, painter: &mut dyn Painter, frame: &DrawFrame<'_>) -> Result<()>;
}

/// Avatar, ring and `"<label> <value>"` tag at the final point of every series.
#[derive(Clone, Debug)]
pub struct EndpointOverlay {
    pub image_size: u32,
    pub ring_width: u32,
    pub font: FontSpec,
    /// Label background for the first series.
    pub first_tint: Rgba,
    /// Label background for every later series.
    pub other_tint: Rgba,
}

impl Default for EndpointOverlay {
    fn default() -> Self {
        Self {
            image_size: 30,
            ring_width: 3,
            font: FontSpec::bold(15),
            first_tint: Rgba::new(75, 192, 192, 0.2),
            other_tint: Rgba::new(153, 102, 255, 0.2),
        }
    }
}

/// Where the endpoint label goes for a point at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelBox {
    pub top_left: (i32, i32),
    pub size: (u32, u32),
    pub text_center: (i32, i32),
}

impl EndpointOverlay {
    const TEXT_H: u32 = 20;

    pub fn radius(&self) -> u32 {
        self.image_size / 2
    }

    fn tint_for(&self, series_index: usize) -> Rgba {
        if series_index == 0 {
            self.first_tint
        } else {
            self.other_tint
        }
    }

    /// Background box sized to the text plus padding, 40 px above the point.
    pub fn label_box(&self, (x, y): (i32, i32), text_width: u32) -> LabelBox {
        LabelBox {
            top_left: (x - text_width as i32 / 2 - 5, y - 40),
            size: (text_width + 18, Self::TEXT_H),
            text_center: (x + 1, y - 30),
        }
    }
}

impl DatasetsDrawHook for EndpointOverlay {
    fn id(&self) -> &'static str {
        "endpoint_image"
    }

    fn after_datasets_draw(&self, painter: &mut dyn Painter, frame: &DrawFrame<'_>) -> Result<()> {
        for (series_index, series) in frame.data.series.iter().enumerate() {
            let (Some((last_idx, last_val)), Some(text)) =
                (series.last_point(), series.endpoint_label())
            else {
                continue;
            };
            let center = (
                frame.x_scale.pixel_for(last_idx),
                frame.y_scale.pixel_for(last_val),
            );

            let avatar_path = frame.assets.avatar_for(series);
            match frame.images.get(&avatar_path) {
                Some(img) => painter.draw_clipped_image(center, self.image_size, img)?,
                None => log::debug!(
                    "no avatar for series {:?} ({}), skipping image",
                    series.label,
                    avatar_path.display()
                ),
            }

            painter.stroke_circle(
                center,
                self.radius(),
                series.border_color,
                self.ring_width,
            )?;

            let text_w = painter.measure_text(&text, &self.font);
            let b = self.label_box(center, text_w);
            painter.fill_rect(b.top_left, b.size, self.tint_for(series_index))?;
            painter.fill_text(&text, b.text_center, &self.font, series.border_color)?;
        }
        Ok(())
    }
}

/// The hooks a chart gets by default: annotation labels, then endpoint overlays.
pub fn default_hooks() -> Vec<Box<dyn DatasetsDrawHook>> {
    vec![
        Box::new(crate::annotations::AnnotationLayer),
        Box::new(EndpointOverlay::default()),
    ]
}
