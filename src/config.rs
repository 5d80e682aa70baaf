//! Layer configuration.
//!
//! Serializable settings for a [`MarkerLayer`](crate::MarkerLayer), loadable
//! from JSON (and TOML with the `toml` feature).

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Configuration for a marker layer.
///
/// # Example
///
/// ```rust
/// use canvas_markers::LayerConfig;
///
/// let config = LayerConfig::default();
/// assert_eq!(config.rebuild_ratio, 0.1);
///
/// let json = r#"{ "rebuild_ratio": 0.25, "default_group": "poi" }"#;
/// let config = LayerConfig::from_json(json).unwrap();
/// assert_eq!(config.default_group, "poi");
/// assert!(config.suppress_hover_while_interacting);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Fraction of individually inserted/removed entries (relative to the live
    /// total) at which the geographic index is rebuilt before a draw.
    #[serde(default = "LayerConfig::default_rebuild_ratio")]
    pub rebuild_ratio: f64,

    /// Group assigned to markers added without an explicit group id.
    #[serde(default = "LayerConfig::default_group")]
    pub default_group: String,

    /// Ignore pointer moves while the viewport is dragging or animating a zoom.
    #[serde(default = "LayerConfig::default_suppress_hover")]
    pub suppress_hover_while_interacting: bool,
}

impl LayerConfig {
    const fn default_rebuild_ratio() -> f64 {
        0.1
    }

    fn default_group() -> String {
        "0".to_string()
    }

    const fn default_suppress_hover() -> bool {
        true
    }

    pub fn with_rebuild_ratio(mut self, ratio: f64) -> Self {
        self.rebuild_ratio = ratio;
        self
    }

    pub fn with_default_group(mut self, group: impl Into<String>) -> Self {
        self.default_group = group.into();
        self
    }

    pub fn with_hover_suppression(mut self, enabled: bool) -> Self {
        self.suppress_hover_while_interacting = enabled;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.rebuild_ratio.is_finite() {
            return Err("Rebuild ratio must be finite (not NaN or infinity)".to_string());
        }
        if self.rebuild_ratio <= 0.0 || self.rebuild_ratio > 1.0 {
            return Err(format!(
                "Rebuild ratio must be in (0.0, 1.0], got: {}",
                self.rebuild_ratio
            ));
        }
        if self.default_group.is_empty() {
            return Err("Default group id cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: LayerConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: LayerConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            rebuild_ratio: Self::default_rebuild_ratio(),
            default_group: Self::default_group(),
            suppress_hover_while_interacting: Self::default_suppress_hover(),
        }
    }
}
