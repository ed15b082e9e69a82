use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use endpoint_chart::images::ImageCache;
use endpoint_chart::models::{ChartData, Rgba, Series};
use endpoint_chart::overlay::default_hooks;
use endpoint_chart::viz::{self, ChartKind};
use endpoint_chart::ChartConfig;

fn write_and_check(kind: ChartKind, name: &str) {
    let dir = tempdir().unwrap();
    let path: PathBuf = dir.path().join(name);
    let config = ChartConfig::default();
    let layout =
        viz::render_to_file(&path, &config, kind, &ImageCache::new(30), &default_hooks()).unwrap();
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "chart has content");
    assert_eq!((layout.width, layout.height), (600, 300));
}

#[test]
fn both_kinds_produce_png_and_svg() {
    write_and_check(ChartKind::Line, "line.png");
    write_and_check(ChartKind::Bar, "bar.png");
    write_and_check(ChartKind::Line, "line.svg");
    write_and_check(ChartKind::Bar, "bar.svg");
}

#[test]
fn svg_output_is_svg_markup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    let config = ChartConfig::default();
    viz::render_to_file(&path, &config, ChartKind::Line, &ImageCache::new(30), &[]).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<svg"));
}

#[test]
fn plot_area_leaves_room_for_overlays() {
    let config = ChartConfig::default();
    let frame = viz::render_frame(&config, ChartKind::Line, &ImageCache::new(30), &[]).unwrap();
    let area = frame.layout.area;
    assert!(area.right <= 600 - 60);
    assert!(area.top >= viz::LEGEND_BAND_PX as i32 + 20);
    assert_eq!(frame.pixels.len(), 600 * 300 * 3);

    // line charts put the first and last categories on the plot edges
    assert_eq!(frame.layout.x_scale.pixel_for(0), area.left);
    assert_eq!(frame.layout.x_scale.pixel_for(6), area.right);
}

#[test]
fn bars_are_offset_into_bands() {
    let config = ChartConfig::default();
    let frame = viz::render_frame(&config, ChartKind::Bar, &ImageCache::new(30), &[]).unwrap();
    let area = frame.layout.area;
    assert!(frame.layout.x_scale.pixel_for(0) > area.left);
    assert!(frame.layout.x_scale.pixel_for(6) < area.right);
    // bar axis starts at zero
    assert_eq!(frame.layout.y_scale.domain.0, 0.0);
}

#[test]
fn mismatched_and_empty_data_still_render() {
    let mut config = ChartConfig::default();
    config.data = ChartData {
        categories: vec!["a".into(), "b".into(), "c".into()],
        series: vec![
            Series {
                label: "short".into(),
                values: vec![1.0],
                border_color: Rgba::rgb(255, 0, 0),
                background_color: Rgba::new(255, 0, 0, 0.4),
                dash: vec![4],
                endpoint_image: None,
            },
            Series {
                label: "none".into(),
                values: vec![],
                border_color: Rgba::rgb(0, 0, 255),
                background_color: Rgba::new(0, 0, 255, 0.4),
                dash: vec![],
                endpoint_image: None,
            },
        ],
    };
    for kind in [ChartKind::Line, ChartKind::Bar] {
        viz::render_frame(&config, kind, &ImageCache::new(30), &default_hooks()).unwrap();
    }

    config.data = ChartData {
        categories: vec![],
        series: vec![],
    };
    let frame =
        viz::render_frame(&config, ChartKind::Line, &ImageCache::new(30), &default_hooks())
            .unwrap();
    assert_eq!(frame.layout.x_scale.count, 0);
}

fn near(frame: &endpoint_chart::RenderedFrame, (x, y): (i32, i32), r: i32) -> Vec<[u8; 3]> {
    (-r..=r)
        .flat_map(|dy| (-r..=r).map(move |dx| (x + dx, y + dy)))
        .filter_map(|(px, py)| frame.pixel(px as u32, py as u32))
        .collect()
}

#[test]
fn lines_pass_through_their_data_points() {
    let config = ChartConfig::default();
    let frame = viz::render_frame(&config, ChartKind::Line, &ImageCache::new(30), &[]).unwrap();
    let l = frame.layout;
    // Appl's April peak (81)
    let at = (l.x_scale.pixel_for(3), l.y_scale.pixel_for(81.0));
    assert!(near(&frame, at, 2).contains(&[75, 192, 192]));
}

#[test]
fn bars_fill_from_zero_to_value() {
    let config = ChartConfig::default();
    let frame = viz::render_frame(&config, ChartKind::Bar, &ImageCache::new(30), &[]).unwrap();
    let l = frame.layout;
    // Appl's bar sits in the left half of the April band
    let x = l.x_scale.pixel_for(3) - (l.x_scale.band_width() * 0.2) as i32;
    let y = l.y_scale.pixel_for(40.0);
    let [r, g, b] = frame.pixel(x as u32, y as u32).unwrap();
    assert!(r < 230 && g > r && b > r, "{:?}", [r, g, b]);
}
