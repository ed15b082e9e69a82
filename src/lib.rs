//! endpoint_chart
//!
//! Render a categorical line/bar chart decorated with per-series endpoint avatars
//! and max-value labels, and export it as `chart.png`. Pairs with the
//! `endpoint-chart` CLI and the `endpoint-chart-gui` desktop viewer.
//!
//! ### Features
//! - Line or grouped-bar presentation, toggled without losing any decoration
//! - Circular avatar, colored ring and `"<label> <value>"` tag at each series' last point
//! - Labelled marker at every series' maximum (first occurrence on ties)
//! - In-memory frames for GUIs, or direct PNG/SVG files
//!
//! ### Example
//! ```no_run
//! use endpoint_chart::{ChartConfig, ChartHost, ChartKind};
//!
//! let mut host = ChartHost::new(ChartConfig::default());
//! host.render()?;
//! host.set_kind(ChartKind::Bar);
//! host.render()?;
//! host.export(std::path::Path::new("out"))?;
//! # Ok::<(), endpoint_chart::ChartError>(())
//! ```

pub mod annotations;
pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod images;
pub mod models;
pub mod overlay;
pub mod scale;
pub mod tooltip;
pub mod viz;

pub use config::ChartConfig;
pub use error::{ChartError, Result};
pub use host::ChartHost;
pub use models::{ChartData, Rgba, Series};
pub use viz::{ChartKind, RenderedFrame};
