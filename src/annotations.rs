//! Per-series annotation markers: an invisible anchor at the final point and a
//! labelled marker at the maximum value.
//!
//! Descriptors are rebuilt on every render pass from the series data and painted
//! by [`AnnotationLayer`] after the datasets are drawn.

use serde::Serialize;

use crate::error::Result;
use crate::models::{ChartData, Rgba, format_value};
use crate::overlay::{DatasetsDrawHook, DrawFrame, FontSpec, Painter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Coordinate reference only; never painted.
    Anchor,
    /// Visible label at the series maximum.
    Max,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub visible: bool,
    pub label_background: Rgba,
    pub label_color: Rgba,
    pub font_px: u32,
    pub bold: bool,
}

impl MarkerStyle {
    pub const HIDDEN: MarkerStyle = MarkerStyle {
        visible: false,
        label_background: Rgba::new(0, 0, 0, 0.0),
        label_color: Rgba::new(0, 0, 0, 0.0),
        font_px: 0,
        bold: false,
    };

    pub const MAX_LABEL: MarkerStyle = MarkerStyle {
        visible: true,
        label_background: Rgba::new(255, 99, 132, 0.8),
        label_color: Rgba::WHITE,
        font_px: 12,
        bold: true,
    };
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub kind: MarkerKind,
    pub series_index: usize,
    pub category_index: usize,
    /// Category label at `category_index`; `None` when the series is longer than the axis.
    pub category: Option<String>,
    pub value: f64,
    pub style: MarkerStyle,
    pub label: Option<String>,
}

/// Index of the largest value. Ties resolve to the lowest index; NaN never wins.
pub fn max_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if *v > values[b] => best = Some(i),
            None => best = Some(i),
            _ => {}
        }
    }
    best
}

/// Two descriptors per non-empty series (anchor, then max), concatenated in series order.
pub fn build_annotations(data: &ChartData) -> Vec<MarkerDescriptor> {
    let mut out = Vec::with_capacity(data.series.len() * 2);
    for (series_index, series) in data.series.iter().enumerate() {
        let (Some((last_idx, last_val)), Some(max_idx)) =
            (series.last_point(), max_index(&series.values))
        else {
            continue;
        };
        let max_val = series.values[max_idx];

        out.push(MarkerDescriptor {
            kind: MarkerKind::Anchor,
            series_index,
            category_index: last_idx,
            category: data.categories.get(last_idx).cloned(),
            value: last_val,
            style: MarkerStyle::HIDDEN,
            label: None,
        });
        out.push(MarkerDescriptor {
            kind: MarkerKind::Max,
            series_index,
            category_index: max_idx,
            category: data.categories.get(max_idx).cloned(),
            value: max_val,
            style: MarkerStyle::MAX_LABEL,
            label: Some(format_value(max_val)),
        });
    }
    out
}

/// Paints visible annotation labels above their points.
#[derive(Clone, Debug, Default)]
pub struct AnnotationLayer;

impl AnnotationLayer {
    const PAD_X: u32 = 6;
    const BOX_H: u32 = 20;
    const GAP: i32 = 6;
}

impl DatasetsDrawHook for AnnotationLayer {
    fn id(&self) -> &'static str {
        "annotation"
    }

    fn after_datasets_draw(&self, painter: &mut dyn Painter, frame: &DrawFrame<'_>) -> Result<()> {
        for marker in build_annotations(frame.data) {
            let (true, Some(text)) = (marker.style.visible, marker.label.as_deref()) else {
                continue;
            };
            let x = frame.x_scale.pixel_for(marker.category_index);
            let y = frame.y_scale.pixel_for(marker.value);
            let font = FontSpec {
                size_px: marker.style.font_px,
                bold: marker.style.bold,
            };

            let w = painter.measure_text(text, &font) + 2 * Self::PAD_X;
            let top = y - Self::GAP - Self::BOX_H as i32;
            painter.fill_rect(
                (x - w as i32 / 2, top),
                (w, Self::BOX_H),
                marker.style.label_background,
            )?;
            painter.fill_text(
                text,
                (x, top + Self::BOX_H as i32 / 2),
                &font,
                marker.style.label_color,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_pick_lowest_index() {
        assert_eq!(max_index(&[3.0, 7.0, 7.0, 1.0]), Some(1));
        assert_eq!(max_index(&[5.0, 5.0, 5.0]), Some(0));
        assert_eq!(max_index(&[]), None);
    }

    #[test]
    fn nan_is_ignored() {
        assert_eq!(max_index(&[f64::NAN, 2.0, 1.0]), Some(1));
        assert_eq!(max_index(&[f64::NAN]), None);
    }

    #[test]
    fn default_data_maxima() {
        let data = ChartData::default();
        let maxima: Vec<_> = build_annotations(&data)
            .into_iter()
            .filter(|m| m.kind == MarkerKind::Max)
            .map(|m| (m.series_index, m.category_index, m.value))
            .collect();
        assert_eq!(maxima, vec![(0, 3, 81.0), (1, 6, 90.0)]);
    }
}
