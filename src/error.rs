//! Error types for the marker layer.

use thiserror::Error;

/// Errors surfaced by the public layer API.
///
/// Index and icon-cache operations are total; only input validation and
/// configuration loading can fail.
#[derive(Debug, Error)]
pub enum LayerError {
    /// A marker (or a value it exposes) failed validation at the add boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The marker is already registered with this layer.
    #[error("Marker is already part of this layer")]
    DuplicateMarker,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, LayerError>;
