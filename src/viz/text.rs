//! Text measurement fallback used when no font is registered.

/// Heuristic: estimate pixel width of text from its character count.
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Bold glyphs run roughly 8% wider.
pub fn estimate_bold_text_width_px(text: &str, font_px: u32) -> u32 {
    (estimate_text_width_px(text, font_px) as f32 * 1.08).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_scales_with_length_and_size() {
        assert_eq!(estimate_text_width_px("", 12), 0);
        let w = estimate_text_width_px("Appl 40", 15);
        assert!((63..=64).contains(&w), "{w}");
        assert!(estimate_bold_text_width_px("Appl 40", 15) > w);
    }
}
