use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ChartError;

/// RGBA color with an `f64` alpha channel in `0.0..=1.0`.
///
/// Serialized as a CSS-like string (`"rgba(75,192,192,0.4)"`). Deserialization also
/// accepts `rgb(r,g,b)` and `#rrggbb` / `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub fn parse(input: &str) -> Result<Self, ChartError> {
        let s = input.trim();
        let bad = || ChartError::InvalidColor(input.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            let byte = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(bad)
            };
            return match hex.len() {
                6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
                8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f64 / 255.0)),
                _ => Err(bad()),
            };
        }

        let (body, want_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(bad());
        };
        let body = body.strip_suffix(')').ok_or_else(bad)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != if want_alpha { 4 } else { 3 } {
            return Err(bad());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| bad());
        let a = if want_alpha {
            let a = parts[3].parse::<f64>().map_err(|_| bad())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(bad());
            }
            a
        } else {
            1.0
        };
        Ok(Self::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.r,
            self.g,
            self.b,
            format_value(self.a)
        )
    }
}

impl TryFrom<String> for Rgba {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgba::parse(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

/// One labeled sequence of values plotted as a line or a bar set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    /// Line stroke, bar outline and endpoint label text color.
    pub border_color: Rgba,
    /// Bar fill, legend point and endpoint ring color.
    pub background_color: Rgba,
    /// Dash pattern in pixels (`[on, off, ...]`); empty means solid.
    #[serde(default)]
    pub dash: Vec<u32>,
    /// Avatar drawn at the final point; falls back to the configured default image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_image: Option<PathBuf>,
}

impl Series {
    /// The final `(index, value)` pair, if any.
    pub fn last_point(&self) -> Option<(usize, f64)> {
        self.values.last().map(|v| (self.values.len() - 1, *v))
    }

    /// Text shown next to the endpoint avatar, e.g. `"Appl 40"`.
    pub fn endpoint_label(&self) -> Option<String> {
        self.last_point()
            .map(|(_, v)| format!("{} {}", self.label, format_value(v)))
    }
}

/// The shared category axis plus every series plotted against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    /// Labels of series whose value count differs from the category count.
    pub fn mismatched_series(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.values.len() != self.categories.len())
            .map(|s| s.label.as_str())
            .collect()
    }

    /// Finite `(min, max)` over every value, or `None` when nothing is plottable.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Number of x positions: the longer of the category axis and the longest series.
    pub fn category_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.values.len())
            .max()
            .unwrap_or(0)
            .max(self.categories.len())
    }
}

impl Default for ChartData {
    fn default() -> Self {
        let categories = [
            "January", "February", "March", "April", "May", "June", "July",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            categories,
            series: vec![
                Series {
                    label: "Appl".into(),
                    values: vec![65.0, 59.0, 80.0, 81.0, 56.0, 55.0, 40.0],
                    border_color: Rgba::new(75, 192, 192, 1.0),
                    background_color: Rgba::new(75, 192, 192, 0.4),
                    dash: Vec::new(),
                    endpoint_image: Some(PathBuf::from("image1.png")),
                },
                Series {
                    label: "Google".into(),
                    values: vec![28.0, 48.0, 40.0, 19.0, 86.0, 27.0, 90.0],
                    border_color: Rgba::new(153, 102, 255, 1.0),
                    background_color: Rgba::new(153, 102, 255, 0.4),
                    dash: vec![5, 5],
                    endpoint_image: Some(PathBuf::from("image2.png")),
                },
            ],
        }
    }
}

/// Format a value the way chart labels print it: integers without a fraction
/// (`40`), everything else in shortest round-trip form (`40.5`).
pub fn format_value(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
