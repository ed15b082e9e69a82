//! The chart host: owns the configuration, the current presentation and the last
//! rendered frame.
//!
//! Toggling the presentation marks the frame stale; the next [`ChartHost::render`]
//! redraws everything from scratch with the same data, annotations and hooks.

use std::path::{Path, PathBuf};

use crate::annotations::{MarkerDescriptor, build_annotations};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::export::export_png;
use crate::images::ImageCache;
use crate::overlay::{DatasetsDrawHook, EndpointOverlay, default_hooks};
use crate::tooltip::{Tooltip, tooltip_at};
use crate::viz::{ChartKind, RenderedFrame, render_frame};

pub struct ChartHost {
    config: ChartConfig,
    kind: ChartKind,
    images: ImageCache,
    hooks: Vec<Box<dyn DatasetsDrawHook>>,
    frame: Option<RenderedFrame>,
    stale: bool,
}

impl ChartHost {
    /// Host with the default hooks. Avatars are loaded here, before the first render.
    pub fn new(config: ChartConfig) -> Self {
        Self::with_hooks(config, default_hooks())
    }

    pub fn with_hooks(config: ChartConfig, hooks: Vec<Box<dyn DatasetsDrawHook>>) -> Self {
        let mut images = ImageCache::new(EndpointOverlay::default().image_size);
        let available = images.preload(
            config
                .data
                .series
                .iter()
                .map(|s| config.assets.avatar_for(s)),
        );
        log::debug!(
            "{} of {} endpoint images available",
            available,
            config.data.series.len()
        );
        Self {
            config,
            kind: ChartKind::default(),
            images,
            hooks,
            frame: None,
            stale: true,
        }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    /// Switch presentation. Setting the current kind again still forces a redraw.
    pub fn set_kind(&mut self, kind: ChartKind) {
        if kind != self.kind {
            log::debug!("chart kind {:?} -> {:?}", self.kind, kind);
        }
        self.kind = kind;
        self.stale = true;
    }

    /// Flip between line and bar; returns the new kind.
    pub fn toggle(&mut self) -> ChartKind {
        self.set_kind(self.kind.toggled());
        self.kind
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Annotation descriptors for the current data.
    pub fn annotations(&self) -> Vec<MarkerDescriptor> {
        build_annotations(&self.config.data)
    }

    /// Current frame, redrawn first when stale.
    pub fn render(&mut self) -> Result<&RenderedFrame> {
        if self.stale || self.frame.is_none() {
            self.frame = Some(render_frame(
                &self.config,
                self.kind,
                &self.images,
                &self.hooks,
            )?);
            self.stale = false;
        }
        self.frame
            .as_ref()
            .ok_or_else(|| ChartError::Draw("chart has not been rendered".into()))
    }

    /// The last rendered frame, if any; never triggers a render.
    pub fn handle(&self) -> Option<&RenderedFrame> {
        self.frame.as_ref()
    }

    /// Export the last rendered frame to `dir/chart.png`; `Ok(None)` before the
    /// first render.
    pub fn export(&self, dir: &Path) -> Result<Option<PathBuf>> {
        export_png(self.handle(), dir)
    }

    /// Tooltip under `(x, y)` in frame pixels.
    pub fn tooltip_at(&self, pos: (i32, i32)) -> Option<Tooltip> {
        let frame = self.frame.as_ref()?;
        tooltip_at(&self.config.data, &frame.layout, pos)
    }
}
