//! Layer builder for flexible configuration
//!
//! Collects settings, validates them once, and hands back a ready
//! [`MarkerLayer`], optionally already attached to a viewport.

use crate::config::LayerConfig;
use crate::error::{LayerError, Result};
use crate::layer::MarkerLayer;
use crate::render::{DrawingSurface, ImageLoader, ViewportProvider};

/// Builder for marker layers.
#[derive(Debug, Clone, Default)]
pub struct LayerBuilder {
    config: LayerConfig,
}

impl LayerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: LayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new().config(LayerConfig::from_json(json)?))
    }

    /// Start from a TOML configuration (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(Self::new().config(LayerConfig::from_toml(toml_str)?))
    }

    /// Churn ratio at which the geographic index is repacked.
    pub fn rebuild_ratio(mut self, ratio: f64) -> Self {
        self.config = self.config.with_rebuild_ratio(ratio);
        self
    }

    /// Group for markers added without one.
    pub fn default_group(mut self, group: impl Into<String>) -> Self {
        self.config = self.config.with_default_group(group);
        self
    }

    pub fn hover_suppression(mut self, enabled: bool) -> Self {
        self.config = self.config.with_hover_suppression(enabled);
        self
    }

    /// Build a detached layer.
    pub fn build<V, S, L>(self, surface: S, loader: L) -> Result<MarkerLayer<V, S, L>>
    where
        V: ViewportProvider,
        S: DrawingSurface,
        L: ImageLoader,
    {
        self.config.validate().map_err(LayerError::InvalidConfig)?;
        log::debug!("building marker layer with {:?}", self.config);
        Ok(MarkerLayer::with_config(self.config, surface, loader))
    }

    /// Build a layer and attach it to `viewport` right away.
    pub fn build_attached<V, S, L>(
        self,
        viewport: V,
        surface: S,
        loader: L,
    ) -> Result<MarkerLayer<V, S, L>>
    where
        V: ViewportProvider,
        S: DrawingSurface,
        L: ImageLoader,
    {
        let mut layer = self.build(surface, loader)?;
        layer.on_add(viewport);
        Ok(layer)
    }
}
