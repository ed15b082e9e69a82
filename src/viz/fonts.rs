//! Runtime font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` doesn't discover OS fonts, so a TrueType face has to be registered
//! under the "sans-serif" family before any text is drawn. A configured font is
//! tried first; the bundled DejaVu Sans faces back it up so text always renders.

use plotters::style::FontStyle;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const BUNDLED_REGULAR: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const BUNDLED_BOLD: &[u8] = include_bytes!("../../assets/DejaVuSans-Bold.ttf");

static FONTS: OnceLock<bool> = OnceLock::new();

/// Register fonts once; returns whether text can be drawn.
///
/// Only the first call's `preferred` font has any effect.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> bool {
    *FONTS.get_or_init(|| register(preferred))
}

#[derive(Clone, Debug)]
struct Face {
    origin: String,
    bytes: &'static [u8],
}

impl Face {
    fn bundled(bytes: &'static [u8]) -> Self {
        Self {
            origin: "bundled DejaVu Sans".to_string(),
            bytes,
        }
    }

    fn read(path: &Path) -> Option<Self> {
        match fs::read(path) {
            Ok(bytes) => Some(Self {
                origin: path.display().to_string(),
                // Plotters keeps registered fonts for the whole process.
                bytes: Box::leak(bytes.into_boxed_slice()),
            }),
            Err(e) => {
                log::warn!("font {} unreadable: {}", path.display(), e);
                None
            }
        }
    }
}

/// Register the first face that parses; returns where it came from.
fn register_first(style: FontStyle, faces: Vec<Face>) -> Option<String> {
    faces.into_iter().find_map(|face| {
        match plotters::style::register_font("sans-serif", style, face.bytes) {
            Ok(()) => Some(face.origin),
            Err(_) => {
                log::warn!("font {} could not be parsed", face.origin);
                None
            }
        }
    })
}

fn register(preferred: Option<&Path>) -> bool {
    let custom = preferred.and_then(Face::read);

    let regular: Vec<Face> = custom
        .iter()
        .cloned()
        .chain([Face::bundled(BUNDLED_REGULAR)])
        .collect();
    let Some(origin) = register_first(FontStyle::Normal, regular) else {
        log::warn!("no usable font; charts will be rendered without text");
        return false;
    };
    log::debug!("registered regular font from {}", origin);

    // A custom face that parsed also serves bold, so both weights match.
    let bold: Vec<Face> = custom
        .into_iter()
        .filter(|f| f.origin == origin)
        .chain([Face::bundled(BUNDLED_BOLD)])
        .collect();
    if register_first(FontStyle::Bold, bold).is_none() {
        log::warn!("no bold font registered; bold labels fall back to the default face");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_faces_are_skipped() {
        let faces = vec![
            Face {
                origin: "junk".into(),
                bytes: b"not a font",
            },
            Face::bundled(BUNDLED_REGULAR),
        ];
        assert_eq!(
            register_first(FontStyle::Normal, faces).as_deref(),
            Some("bundled DejaVu Sans")
        );
        assert_eq!(register_first(FontStyle::Normal, vec![]), None);
    }

    #[test]
    fn unparsable_custom_font_falls_back_to_bundled_face() {
        let not_a_font = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/logo.png"));
        assert!(register(Some(not_a_font)));
    }

    #[test]
    fn missing_custom_font_falls_back_to_bundled_face() {
        assert!(register(Some(Path::new("does/not/exist.ttf"))));
        assert!(register(None));
    }
}
