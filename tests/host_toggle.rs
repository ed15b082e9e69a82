use image::RgbaImage;
use tempfile::tempdir;

use endpoint_chart::export::EXPORT_FILE_NAME;
use endpoint_chart::{ChartConfig, ChartHost, ChartKind};

fn config_with_avatars(dir: &std::path::Path) -> ChartConfig {
    let red = RgbaImage::from_pixel(40, 40, image::Rgba([255, 0, 0, 255]));
    red.save(dir.join("image1.png")).unwrap();
    red.save(dir.join("image2.png")).unwrap();
    let mut config = ChartConfig::default();
    config.assets.dir = dir.to_path_buf();
    config
}

#[test]
fn starts_as_line_and_toggles() {
    let mut host = ChartHost::new(ChartConfig::default());
    assert_eq!(host.kind(), ChartKind::Line);
    assert!(host.is_stale());
    assert_eq!(host.toggle(), ChartKind::Bar);
    assert_eq!(host.toggle(), ChartKind::Line);
}

#[test]
fn line_bar_line_is_idempotent() {
    let mut host = ChartHost::new(ChartConfig::default());
    let before_markers = host.annotations();
    let before = host.render().unwrap().clone();

    host.toggle();
    let bar = host.render().unwrap().clone();
    assert_eq!(bar.kind, ChartKind::Bar);
    assert_ne!(bar.pixels, before.pixels);

    host.toggle();
    let after = host.render().unwrap().clone();
    assert_eq!(after, before);
    assert_eq!(host.annotations(), before_markers);
}

#[test]
fn render_only_redraws_when_stale() {
    let mut host = ChartHost::new(ChartConfig::default());
    host.render().unwrap();
    assert!(!host.is_stale());
    host.set_kind(ChartKind::Line);
    assert!(host.is_stale());
    host.render().unwrap();
    assert!(!host.is_stale());
}

#[test]
fn export_without_render_is_silent_noop() {
    let dir = tempdir().unwrap();
    let host = ChartHost::new(ChartConfig::default());
    assert!(host.handle().is_none());
    assert_eq!(host.export(dir.path()).unwrap(), None);
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn export_writes_decodable_chart_png() {
    let dir = tempdir().unwrap();
    let mut host = ChartHost::new(ChartConfig::default());
    host.render().unwrap();
    let path = host.export(dir.path()).unwrap().unwrap();
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (600, 300));

    // a second export replaces the first
    host.toggle();
    host.render().unwrap();
    assert_eq!(host.export(dir.path()).unwrap(), Some(path));
}

#[test]
fn preloaded_avatars_are_painted_at_endpoints() {
    let dir = tempdir().unwrap();
    let mut host = ChartHost::new(config_with_avatars(dir.path()));
    assert_eq!(host.images().diameter(), 30);

    let frame = host.render().unwrap();
    let layout = frame.layout;
    let x = layout.x_scale.pixel_for(6) as u32;
    let y = layout.y_scale.pixel_for(40.0) as u32;
    assert_eq!(frame.pixel(x, y), Some([255, 0, 0]));
}

#[test]
fn missing_avatars_still_render() {
    let dir = tempdir().unwrap();
    let mut config = ChartConfig::default();
    config.assets.dir = dir.path().join("nowhere");
    let mut host = ChartHost::new(config);
    let frame = host.render().unwrap();
    let layout = frame.layout;
    let x = layout.x_scale.pixel_for(6) as u32;
    let y = layout.y_scale.pixel_for(40.0) as u32;
    assert_ne!(frame.pixel(x, y), Some([255, 0, 0]));
}

#[test]
fn tooltip_follows_last_frame() {
    let mut host = ChartHost::new(ChartConfig::default());
    assert!(host.tooltip_at((300, 150)).is_none());
    let layout = host.render().unwrap().layout;
    let x = layout.x_scale.pixel_for(3);
    let y = (layout.area.top + layout.area.bottom) / 2;
    let tip = host.tooltip_at((x, y)).unwrap();
    assert_eq!(tip.title, "April");
    assert_eq!(tip.lines, vec!["Appl: 81", "Google: 19"]);
}
