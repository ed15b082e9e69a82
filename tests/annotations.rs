use endpoint_chart::annotations::{MarkerKind, MarkerStyle, build_annotations, max_index};
use endpoint_chart::models::{ChartData, Rgba, Series};

fn series(label: &str, values: &[f64]) -> Series {
    Series {
        label: label.into(),
        values: values.to_vec(),
        border_color: Rgba::rgb(0, 0, 0),
        background_color: Rgba::new(0, 0, 0, 0.4),
        dash: Vec::new(),
        endpoint_image: None,
    }
}

#[test]
fn sample_data_marks_last_point_and_maximum() {
    let markers = build_annotations(&ChartData::default());
    assert_eq!(markers.len(), 4);

    // Appl: anchor at July (40), max 81 at April
    assert_eq!(markers[0].kind, MarkerKind::Anchor);
    assert_eq!(markers[0].category_index, 6);
    assert_eq!(markers[0].category.as_deref(), Some("July"));
    assert_eq!(markers[0].value, 40.0);
    assert!(!markers[0].style.visible);
    assert_eq!(markers[1].kind, MarkerKind::Max);
    assert_eq!(markers[1].category_index, 3);
    assert_eq!(markers[1].value, 81.0);
    assert_eq!(markers[1].label.as_deref(), Some("81"));
    assert_eq!(markers[1].style, MarkerStyle::MAX_LABEL);

    // Google peaks on its final point, so both markers share July
    assert_eq!(markers[2].series_index, 1);
    assert_eq!(markers[2].value, 90.0);
    assert_eq!(markers[3].category_index, 6);
    assert_eq!(markers[3].value, 90.0);
}

#[test]
fn ties_pick_first_occurrence() {
    assert_eq!(max_index(&[1.0, 5.0, 5.0, 2.0]), Some(1));
    assert_eq!(max_index(&[]), None);
    assert_eq!(max_index(&[f64::NAN, 2.0]), Some(1));
}

#[test]
fn empty_series_contribute_nothing() {
    let data = ChartData {
        categories: vec!["a".into(), "b".into()],
        series: vec![series("empty", &[]), series("x", &[3.0, 1.0])],
    };
    let markers = build_annotations(&data);
    assert_eq!(markers.len(), 2);
    assert!(markers.iter().all(|m| m.series_index == 1));
    assert_eq!(markers[1].category.as_deref(), Some("a"));
}

#[test]
fn series_longer_than_axis_keeps_index() {
    let data = ChartData {
        categories: vec!["a".into()],
        series: vec![series("x", &[1.0, 2.0, 9.0])],
    };
    let markers = build_annotations(&data);
    assert_eq!(markers[0].category_index, 2);
    assert_eq!(markers[0].category, None);
    assert_eq!(markers[1].category_index, 2);
}
