//! [`Painter`] implementation over any Plotters drawing area.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontStyle};
use std::borrow::Cow;

use super::text::{estimate_bold_text_width_px, estimate_text_width_px};
use super::util::to_plotters;
use crate::error::{Result, draw_err};
use crate::images::in_circle;
use crate::models::Rgba;
use crate::overlay::{FontSpec, Painter};

pub struct PlottersPainter<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    text_enabled: bool,
}

impl<'a, DB: DrawingBackend> PlottersPainter<'a, DB> {
    /// `text_enabled` is false when no font is registered; text calls become no-ops.
    pub fn new(area: &'a DrawingArea<DB, Shift>, text_enabled: bool) -> Self {
        Self { area, text_enabled }
    }

    fn text_style(font: &FontSpec, color: Rgba) -> TextStyle<'static> {
        let style = if font.bold {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        };
        TextStyle {
            font: (FontFamily::SansSerif, font.size_px as f64, style).into(),
            color: to_plotters(color).to_backend_color(),
            pos: Pos::new(HPos::Center, VPos::Center),
        }
    }
}

impl<DB: DrawingBackend> Painter for PlottersPainter<'_, DB> {
    fn draw_clipped_image(
        &mut self,
        center: (i32, i32),
        diameter: u32,
        image: &RgbaImage,
    ) -> Result<()> {
        let img: Cow<'_, RgbaImage> = if image.dimensions() == (diameter, diameter) {
            Cow::Borrowed(image)
        } else {
            Cow::Owned(imageops::resize(image, diameter, diameter, FilterType::Triangle))
        };
        let origin = (center.0 - diameter as i32 / 2, center.1 - diameter as i32 / 2);
        for (px, py, p) in img.enumerate_pixels() {
            if p[3] == 0 || !in_circle(diameter, px, py) {
                continue;
            }
            let color = RGBAColor(p[0], p[1], p[2], p[3] as f64 / 255.0);
            self.area
                .draw_pixel((origin.0 + px as i32, origin.1 + py as i32), &color)
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn stroke_circle(
        &mut self,
        center: (i32, i32),
        radius: u32,
        color: Rgba,
        width: u32,
    ) -> Result<()> {
        let style = ShapeStyle {
            color: to_plotters(color),
            filled: false,
            stroke_width: width,
        };
        self.area
            .draw(&Circle::new(center, radius as i32, style))
            .map_err(draw_err)
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: u32, color: Rgba) -> Result<()> {
        self.area
            .draw(&Circle::new(center, radius as i32, to_plotters(color).filled()))
            .map_err(draw_err)
    }

    fn fill_rect(&mut self, top_left: (i32, i32), size: (u32, u32), color: Rgba) -> Result<()> {
        let bottom_right = (top_left.0 + size.0 as i32, top_left.1 + size.1 as i32);
        self.area
            .draw(&Rectangle::new(
                [top_left, bottom_right],
                to_plotters(color).filled(),
            ))
            .map_err(draw_err)
    }

    fn fill_text(
        &mut self,
        text: &str,
        center: (i32, i32),
        font: &FontSpec,
        color: Rgba,
    ) -> Result<()> {
        if !self.text_enabled || text.is_empty() {
            return Ok(());
        }
        let style = Self::text_style(font, color);
        self.area
            .draw(&Text::new(text.to_string(), center, style))
            .map_err(draw_err)
    }

    fn measure_text(&self, text: &str, font: &FontSpec) -> u32 {
        let estimate = || {
            if font.bold {
                estimate_bold_text_width_px(text, font.size_px)
            } else {
                estimate_text_width_px(text, font.size_px)
            }
        };
        if !self.text_enabled {
            return estimate();
        }
        let style = Self::text_style(font, Rgba::WHITE);
        self.area
            .estimate_text_size(text, &style)
            .map(|(w, _)| w)
            .unwrap_or_else(|_| estimate())
    }
}
