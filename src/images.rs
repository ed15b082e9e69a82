//! Avatar loading and circular clipping helpers.
//!
//! Images are decoded once, resized to the avatar diameter and cached by source
//! path. A failed load is cached as absent, so a missing file costs one attempt
//! per session and the overlay simply leaves that avatar out.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Default)]
pub struct ImageCache {
    diameter: u32,
    entries: HashMap<PathBuf, Option<RgbaImage>>,
}

impl ImageCache {
    /// Cache that scales every image to `diameter` × `diameter`.
    pub fn new(diameter: u32) -> Self {
        Self {
            diameter,
            entries: HashMap::new(),
        }
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// Load every path not seen before. Returns how many are available.
    pub fn preload<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for p in paths {
            let p = p.as_ref();
            if self.entries.contains_key(p) {
                continue;
            }
            let loaded = match load_scaled(p, self.diameter) {
                Ok(img) => Some(img),
                Err(e) => {
                    log::debug!("image {} unavailable: {}", p.display(), e);
                    None
                }
            };
            self.entries.insert(p.to_path_buf(), loaded);
        }
        self.entries.values().filter(|e| e.is_some()).count()
    }

    /// Insert an already decoded image (scaled to the cache diameter).
    pub fn insert(&mut self, path: impl Into<PathBuf>, img: &RgbaImage) {
        let scaled = scale(img, self.diameter);
        self.entries.insert(path.into(), Some(scaled));
    }

    pub fn get(&self, path: &Path) -> Option<&RgbaImage> {
        self.entries.get(path).and_then(Option::as_ref)
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.get(path).is_some()
    }
}

/// Decode an image file as RGBA without resizing.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

fn load_scaled(path: &Path, diameter: u32) -> Result<RgbaImage> {
    Ok(scale(&load_rgba(path)?, diameter))
}

fn scale(img: &RgbaImage, diameter: u32) -> RgbaImage {
    if img.dimensions() == (diameter, diameter) {
        img.clone()
    } else {
        imageops::resize(img, diameter, diameter, FilterType::Triangle)
    }
}

/// Whether pixel `(px, py)` of a `diameter`-sized square lies inside the
/// inscribed circle (pixel centers are tested).
pub fn in_circle(diameter: u32, px: u32, py: u32) -> bool {
    let r = diameter as f64 / 2.0;
    let dx = px as f64 + 0.5 - r;
    let dy = py as f64 + 0.5 - r;
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn circle_mask_excludes_corners() {
        assert!(in_circle(30, 15, 15));
        assert!(in_circle(30, 0, 15));
        assert!(!in_circle(30, 0, 0));
        assert!(!in_circle(30, 29, 29));
        let inside = (0..30)
            .flat_map(|y| (0..30).map(move |x| (x, y)))
            .filter(|(x, y)| in_circle(30, *x, *y))
            .count();
        // pi * 15^2 ~= 707
        assert!((680..=730).contains(&inside), "{inside}");
    }

    #[test]
    fn preload_caches_missing_files_as_absent() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.png");
        RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255]))
            .save(&good)
            .unwrap();
        let missing = dir.path().join("nope.png");

        let mut cache = ImageCache::new(30);
        assert_eq!(cache.preload([&good, &missing]), 1);
        assert_eq!(cache.get(&good).map(|i| i.dimensions()), Some((30, 30)));
        assert!(!cache.is_loaded(&missing));
    }
}
