//! Visualization: render the chart to an in-memory bitmap, **PNG** or **SVG**.
//!
//! - Line or grouped-bar presentation over a shared category axis
//! - Locale-aware y tick labels (`30,000` vs `30.000`)
//! - Top legend with point-style markers
//! - Draw hooks (annotation labels, endpoint avatars) painted after the datasets
//!
//! Every pass is total: axes, datasets, legend and hooks are redrawn from the
//! config, nothing is carried over from a previous frame.

pub mod fonts;
pub mod legend;
pub mod painter;
pub mod text;
pub mod types;
pub mod util;

// Re-export types for public API
pub use types::{ChartKind, FrameLayout, RenderedFrame};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::FontFamily;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

use crate::config::ChartConfig;
use crate::error::{Result, draw_err};
use crate::images::ImageCache;
use crate::models::ChartData;
use crate::overlay::{DatasetsDrawHook, DrawFrame, FontSpec, Painter};
use crate::scale::{CategoryScale, LinearScale, PlotArea, nice_range};

use fonts::ensure_fonts_registered;
use legend::draw_legend;
use painter::PlottersPainter;
use util::{
    AXIS, GRID, LABEL, compute_left_label_area_px, dash_pair, format_tick, map_locale,
    tick_text_style, to_plotters,
};

/// Height of the legend band above the plot.
pub const LEGEND_BAND_PX: u32 = 32;
/// Extra room so endpoint overlays are not clipped at the right and top edges.
const PAD_RIGHT: u32 = 60;
const PAD_TOP: u32 = 20;
const MARGIN: u32 = 10;
const BOTTOM_LABEL_AREA: u32 = 28;
const Y_TICKS: usize = 10;
const TICK_FONT: FontSpec = FontSpec::regular(12);

/// Fraction of a category band taken by a bar group, and of a slot taken by a bar.
const CATEGORY_PERCENTAGE: f64 = 0.8;
const BAR_PERCENTAGE: f64 = 0.9;

/// Render into an RGB buffer of `config.width` × `config.height`.
pub fn render_frame(
    config: &ChartConfig,
    kind: ChartKind,
    images: &ImageCache,
    hooks: &[Box<dyn DatasetsDrawHook>],
) -> Result<RenderedFrame> {
    let text = ensure_fonts_registered(config.font.as_deref());
    let (w, h) = (config.width, config.height);
    let mut pixels = vec![255u8; (w as usize) * (h as usize) * 3];
    let layout = {
        let root = BitMapBackend::with_buffer(&mut pixels, (w, h)).into_drawing_area();
        let layout = draw_chart(&root, config, kind, images, hooks, text)?;
        root.present().map_err(draw_err)?;
        layout
    };
    Ok(RenderedFrame {
        kind,
        pixels,
        layout,
    })
}

/// Render straight to a file; `.svg` selects the SVG backend, anything else PNG.
pub fn render_to_file<P: AsRef<Path>>(
    out_path: P,
    config: &ChartConfig,
    kind: ChartKind,
    images: &ImageCache,
    hooks: &[Box<dyn DatasetsDrawHook>],
) -> Result<FrameLayout> {
    let text = ensure_fonts_registered(config.font.as_deref());
    let out_path = out_path.as_ref();
    let size = (config.width, config.height);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    let layout = if is_svg {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        let layout = draw_chart(&root, config, kind, images, hooks, text)?;
        root.present().map_err(draw_err)?;
        layout
    } else {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        let layout = draw_chart(&root, config, kind, images, hooks, text)?;
        root.present().map_err(draw_err)?;
        layout
    };
    log::info!("wrote {:?} chart to {}", kind, out_path.display());
    Ok(layout)
}

/// Draw one complete pass onto any Plotters backend.
pub fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
    kind: ChartKind,
    images: &ImageCache,
    hooks: &[Box<dyn DatasetsDrawHook>],
    text_enabled: bool,
) -> Result<FrameLayout>
where
    DB: DrawingBackend,
{
    let data = &config.data;
    let mismatched = data.mismatched_series();
    if !mismatched.is_empty() {
        log::warn!(
            "series {:?} do not match the {} categories; drawing what is there",
            mismatched,
            data.categories.len()
        );
    }

    let (root_w, root_h) = root.dim_in_pixel();
    root.fill(&WHITE).map_err(draw_err)?;
    let (_legend_band, plot_area) = root.split_vertically(LEGEND_BAND_PX);

    // ----------------------------
    // 1) Domains
    // ----------------------------
    let count = data.category_count();
    let offset = kind.offset_categories();
    let (lo, hi) = data.value_bounds().unwrap_or((0.0, 1.0));
    let (lo, hi) = match kind {
        ChartKind::Bar => (lo.min(0.0), hi.max(0.0)),
        ChartKind::Line => (lo, hi),
    };
    let (y_min, y_max, step) = nice_range(lo, hi, Y_TICKS);
    let (x_min, x_max) = CategoryScale::domain_for(count, offset);

    let (num_locale, dec_sep) = map_locale(&config.locale);
    let y_label_fmt = |v: &f64| format_tick(*v, step, num_locale, dec_sep);
    let tick_labels: Vec<String> = (0..=Y_TICKS)
        .map(|i| y_label_fmt(&(y_min + step * i as f64)))
        .collect();
    let left_label_w = compute_left_label_area_px(&tick_labels, TICK_FONT.size_px);
    let y_label_count = if text_enabled {
        ((y_max - y_min) / step).round() as usize + 1
    } else {
        0
    };

    // ----------------------------
    // 2) Axes & grid
    // ----------------------------
    let area = {
        let mut builder = ChartBuilder::on(&plot_area);
        builder
            .margin_top(PAD_TOP)
            .margin_right(PAD_RIGHT)
            .margin_left(MARGIN)
            .margin_bottom(MARGIN)
            .set_label_area_size(LabelAreaPosition::Left, left_label_w)
            .set_label_area_size(LabelAreaPosition::Bottom, BOTTOM_LABEL_AREA);
        if let Some(title) = config.title.as_deref().filter(|t| !t.trim().is_empty())
            && text_enabled
        {
            builder.caption(title.trim(), (FontFamily::SansSerif, 20.0));
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_labels(y_label_count)
            .y_label_formatter(&y_label_fmt)
            .label_style(tick_text_style(TICK_FONT.size_px))
            .bold_line_style(GRID)
            .light_line_style(TRANSPARENT)
            .axis_style(AXIS)
            .draw()
            .map_err(draw_err)?;

        // ----------------------------
        // 3) Datasets
        // ----------------------------
        match kind {
            ChartKind::Line => draw_lines(&mut chart, data)?,
            ChartKind::Bar => draw_bars(&mut chart, data, 0.0f64.clamp(y_min, y_max))?,
        }

        let (xr, yr) = chart.plotting_area().get_pixel_range();
        PlotArea {
            left: xr.start,
            top: yr.start,
            right: xr.end,
            bottom: yr.end,
        }
    };
    let x_scale = CategoryScale::new(count, offset, &area);
    let y_scale = LinearScale::vertical((y_min, y_max), &area);

    let mut painter = PlottersPainter::new(root, text_enabled);

    for i in 0..count {
        if let Some(label) = data.categories.get(i) {
            painter.fill_text(
                label,
                (x_scale.pixel_for(i), area.bottom + BOTTOM_LABEL_AREA as i32 / 2),
                &TICK_FONT,
                LABEL,
            )?;
        }
    }

    // ----------------------------
    // 4) Legend & hooks
    // ----------------------------
    draw_legend(&mut painter, data, root_w as i32, LEGEND_BAND_PX as i32)?;

    let frame = DrawFrame {
        data,
        area,
        x_scale: &x_scale,
        y_scale: &y_scale,
        assets: &config.assets,
        images,
    };
    for hook in hooks {
        log::trace!("running draw hook {}", hook.id());
        hook.after_datasets_draw(&mut painter, &frame)?;
    }

    Ok(FrameLayout {
        width: root_w,
        height: root_h,
        area,
        x_scale,
        y_scale,
    })
}

type CategoryChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_lines<DB: DrawingBackend>(
    chart: &mut CategoryChart<'_, DB>,
    data: &ChartData,
) -> Result<()> {
    for series in &data.series {
        let style = ShapeStyle {
            color: to_plotters(series.border_color),
            filled: false,
            stroke_width: 2,
        };
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (i as f64, *v))
            .collect();
        match dash_pair(&series.dash) {
            Some((dash, gap)) => chart
                .draw_series(DashedLineSeries::new(points, dash, gap, style))
                .map_err(draw_err)?,
            None => chart
                .draw_series(LineSeries::new(points, style))
                .map_err(draw_err)?,
        };
    }
    Ok(())
}

/// Grouped bars: each category band holds one bar per series, in series order.
fn draw_bars<DB: DrawingBackend>(
    chart: &mut CategoryChart<'_, DB>,
    data: &ChartData,
    base: f64,
) -> Result<()> {
    let n_series = data.series.len().max(1) as f64;
    let slot_w = CATEGORY_PERCENTAGE / n_series;
    let bar_w = slot_w * BAR_PERCENTAGE;

    for (idx, series) in data.series.iter().enumerate() {
        let fill = to_plotters(series.background_color).filled();
        let border = to_plotters(series.border_color).stroke_width(1);
        let bars: Vec<[(f64, f64); 2]> = series
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| {
                let x0 = i as f64 - CATEGORY_PERCENTAGE / 2.0
                    + idx as f64 * slot_w
                    + (slot_w - bar_w) / 2.0;
                [(x0, *v), (x0 + bar_w, base)]
            })
            .collect();
        chart
            .draw_series(bars.iter().map(|c| Rectangle::new(*c, fill)))
            .map_err(draw_err)?;
        chart
            .draw_series(bars.iter().map(|c| Rectangle::new(*c, border)))
            .map_err(draw_err)?;
    }
    Ok(())
}
