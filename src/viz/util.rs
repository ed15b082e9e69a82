//! Utility functions for visualization: colors, locale mapping, tick labels, dash patterns.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::estimate_text_width_px;
use crate::models::Rgba;

/// Y grid line color.
pub const GRID: RGBColor = RGBColor(0xe9, 0xe9, 0xe9);
/// Axis line color.
pub const AXIS: RGBColor = RGBColor(0xc8, 0xc8, 0xc8);
/// Tick and legend text color.
pub const LABEL: Rgba = Rgba::rgb(0x66, 0x66, 0x66);

#[inline]
pub fn to_plotters(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

/// Axis tick label style in [`LABEL`] color.
pub fn tick_text_style(font_px: u32) -> TextStyle<'static> {
    TextStyle {
        font: (FontFamily::SansSerif, font_px as f64).into(),
        color: to_plotters(LABEL).to_backend_color(),
        pos: Pos::new(HPos::Left, VPos::Top),
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a y tick: thousands separators for the integer part, up to two
/// decimals when the step is fractional.
pub fn format_tick(v: f64, step: f64, locale: &Locale, dec_sep: char) -> String {
    let decimals = if step >= 1.0 {
        0
    } else if step >= 0.1 {
        1
    } else {
        2
    };
    let scaled = 10f64.powi(decimals);
    let rounded = (v * scaled).round() / scaled;
    let int_part = rounded.trunc().abs() as i64;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let mut s = format!("{sign}{}", int_part.to_formatted_string(locale));
    if decimals > 0 {
        let frac = ((rounded.abs().fract()) * scaled).round() as i64;
        s.push(dec_sep);
        s.push_str(&format!("{:0width$}", frac, width = decimals as usize));
    }
    s
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(labels: &[String], font_px: u32) -> u32 {
    let max_px = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    // Padding for tick marks & a little breathing room.
    max_px.saturating_add(14).clamp(32, 140)
}

/// `(dash, gap)` lengths for a stroke pattern, or `None` for a solid line.
///
/// A single entry is used for both lengths; entries past the first pair are ignored.
pub fn dash_pair(pattern: &[u32]) -> Option<(u32, u32)> {
    let dash = *pattern.first()?;
    let gap = pattern.get(1).copied().unwrap_or(dash);
    (dash > 0 && gap > 0).then_some((dash, gap))
}
