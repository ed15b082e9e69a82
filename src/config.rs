//! Chart configuration: dimensions, locale, asset locations and the plotted data.
//!
//! Stored as JSON. [`ChartConfig::default`] reproduces the built-in two-series
//! dataset so both binaries work without any file on disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result};
use crate::models::{ChartData, Series};

/// Accepted range for both chart dimensions, in pixels.
pub const DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 200..=3000;

/// Where avatar and logo images live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    /// Base directory every relative asset path is resolved against.
    pub dir: PathBuf,
    pub logo: PathBuf,
    /// Avatar used for series without their own `endpoint_image`.
    pub endpoint_image: PathBuf,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("assets"),
            logo: PathBuf::from("logo.png"),
            endpoint_image: PathBuf::from("endpoint.png"),
        }
    }
}

impl Assets {
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    pub fn logo_path(&self) -> PathBuf {
        self.resolve(&self.logo)
    }

    /// Avatar path for one series, falling back to the default endpoint image.
    pub fn avatar_for(&self, series: &Series) -> PathBuf {
        let p = series
            .endpoint_image
            .as_deref()
            .unwrap_or(self.endpoint_image.as_path());
        self.resolve(p)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Caption drawn above the plot; none by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Locale tag for y tick labels (`en`, `de`, ...).
    pub locale: String,
    /// TrueType font used for all text; system locations are tried when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
    pub assets: Assets,
    pub data: ChartData,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            width: 600,
            height: 300,
            locale: "en".to_string(),
            font: None,
            assets: Assets::default(),
            data: ChartData::default(),
        }
    }
}

impl ChartConfig {
    /// Load and validate a JSON config. Relative asset directories are resolved
    /// against the config file's own directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut cfg: ChartConfig =
            serde_json::from_str(&text).map_err(|source| ChartError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        if cfg.assets.dir.is_relative()
            && let Some(parent) = path.parent()
        {
            cfg.assets.dir = parent.join(&cfg.assets.dir);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Save as pretty JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let s = serde_json::to_string_pretty(self).map_err(|source| ChartError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !DIMENSION_RANGE.contains(&self.width) {
            return Err(ChartError::Invalid(format!(
                "chart width must be between {} and {} pixels, got {}",
                DIMENSION_RANGE.start(),
                DIMENSION_RANGE.end(),
                self.width
            )));
        }
        if !DIMENSION_RANGE.contains(&self.height) {
            return Err(ChartError::Invalid(format!(
                "chart height must be between {} and {} pixels, got {}",
                DIMENSION_RANGE.start(),
                DIMENSION_RANGE.end(),
                self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn avatar_falls_back_to_default_image() {
        let assets = Assets::default();
        let mut series = ChartData::default().series[0].clone();
        assert_eq!(assets.avatar_for(&series), PathBuf::from("assets/image1.png"));
        series.endpoint_image = None;
        assert_eq!(assets.avatar_for(&series), PathBuf::from("assets/endpoint.png"));
    }

    #[test]
    fn load_resolves_assets_next_to_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.json");
        ChartConfig::default().save(&path).unwrap();

        let cfg = ChartConfig::load(&path).unwrap();
        assert_eq!(cfg.assets.dir, dir.path().join("assets"));
        assert_eq!(cfg.data, ChartData::default());
    }

    #[test]
    fn load_rejects_out_of_range_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chart.json");
        let cfg = ChartConfig {
            width: 50,
            ..ChartConfig::default()
        };
        cfg.save(&path).unwrap();
        assert!(matches!(
            ChartConfig::load(&path),
            Err(ChartError::Invalid(_))
        ));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: ChartConfig = serde_json::from_str(r#"{ "width": 800 }"#).unwrap();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 300);
        assert_eq!(cfg.data.series.len(), 2);
    }
}
