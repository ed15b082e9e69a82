//! Top legend band: one point-style marker plus label per series, centered.

use crate::error::Result;
use crate::models::ChartData;
use crate::overlay::{FontSpec, Painter};

use super::util::LABEL;

const FONT: FontSpec = FontSpec::regular(12);
const MARKER_RADIUS: i32 = 5;
const MARKER_TO_TEXT_GAP: i32 = 6;
const ITEM_GAP: i32 = 16;

/// Horizontal extent of one legend item, used for layout and hit testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendItem {
    pub x: i32,
    pub width: i32,
    pub text_width: i32,
}

/// Lay the items out on one centered row of `band_width` pixels.
pub fn layout_legend(
    painter: &dyn Painter,
    data: &ChartData,
    band_width: i32,
) -> Vec<LegendItem> {
    let widths: Vec<(i32, i32)> = data
        .series
        .iter()
        .map(|s| {
            let text_w = painter.measure_text(&s.label, &FONT) as i32;
            (2 * MARKER_RADIUS + MARKER_TO_TEXT_GAP + text_w, text_w)
        })
        .collect();
    let total: i32 = widths.iter().map(|(w, _)| *w).sum::<i32>()
        + ITEM_GAP * (widths.len() as i32 - 1).max(0);

    let mut x = ((band_width - total) / 2).max(0);
    widths
        .into_iter()
        .map(|(width, text_width)| {
            let item = LegendItem {
                x,
                width,
                text_width,
            };
            x += width + ITEM_GAP;
            item
        })
        .collect()
}

/// Draw the legend in a band `band_height` tall at the top of the surface.
pub fn draw_legend(
    painter: &mut dyn Painter,
    data: &ChartData,
    band_width: i32,
    band_height: i32,
) -> Result<()> {
    let items = layout_legend(painter, data, band_width);
    let cy = band_height / 2;
    for (series, item) in data.series.iter().zip(items) {
        let marker = (item.x + MARKER_RADIUS, cy);
        painter.fill_circle(marker, MARKER_RADIUS as u32, series.background_color)?;
        painter.stroke_circle(marker, MARKER_RADIUS as u32, series.border_color, 1)?;

        let text_x = item.x + 2 * MARKER_RADIUS + MARKER_TO_TEXT_GAP + item.text_width / 2;
        painter.fill_text(&series.label, (text_x, cy), &FONT, LABEL)?;
    }
    Ok(())
}
