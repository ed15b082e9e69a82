//! Hover tooltips in index mode: every series' value at the category under the pointer.

use serde::Serialize;

use crate::models::{ChartData, format_value};
use crate::viz::FrameLayout;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub index: usize,
    /// Category label, empty when the category has no label.
    pub title: String,
    /// One `"<series>: <value>"` line per series with a value at `index`.
    pub lines: Vec<String>,
}

/// Tooltip for the pointer at `(x, y)` in frame pixels; `None` outside the plot area
/// or when nothing is plotted there.
pub fn tooltip_at(data: &ChartData, layout: &FrameLayout, (x, y): (i32, i32)) -> Option<Tooltip> {
    if !layout.area.contains((x, y)) {
        return None;
    }
    let index = layout.x_scale.index_at(x as f64)?;
    let lines: Vec<String> = data
        .series
        .iter()
        .filter_map(|s| {
            let v = s.values.get(index).filter(|v| v.is_finite())?;
            Some(format!("{}: {}", s.label, format_value(*v)))
        })
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(Tooltip {
        index,
        title: data.categories.get(index).cloned().unwrap_or_default(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{CategoryScale, LinearScale, PlotArea};

    fn layout(count: usize) -> FrameLayout {
        let area = PlotArea {
            left: 0,
            top: 0,
            right: 600,
            bottom: 200,
        };
        FrameLayout {
            width: 700,
            height: 260,
            area,
            x_scale: CategoryScale::new(count, false, &area),
            y_scale: LinearScale::vertical((0.0, 100.0), &area),
        }
    }

    #[test]
    fn lists_every_series_at_nearest_category() {
        let data = ChartData::default();
        let tip = tooltip_at(&data, &layout(7), (590, 100)).unwrap();
        assert_eq!(tip.index, 6);
        assert_eq!(tip.title, "July");
        assert_eq!(tip.lines, vec!["Appl: 40", "Google: 90"]);
    }

    #[test]
    fn outside_plot_area_is_none() {
        let data = ChartData::default();
        assert!(tooltip_at(&data, &layout(7), (650, 100)).is_none());
        let empty = ChartData {
            categories: vec![],
            series: vec![],
        };
        assert!(tooltip_at(&empty, &layout(0), (10, 10)).is_none());
    }
}
