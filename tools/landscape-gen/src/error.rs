//! Error types for preset catalogs and script generation

use std::io;

/// Error type for catalog loading, validation and dumping.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid preset '{key}': {reason}")]
    InvalidPreset { key: String, reason: String },
    #[error("Duplicate preset key: {0}")]
    DuplicateKey(String),
    #[error("Catalog has no terrain presets")]
    EmptyTerrain,
}

impl CatalogError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPreset {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error type for script generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("Unknown terrain preset: {0}")]
    UnknownTerrain(String),
    #[error("Unknown scatter preset: {0}")]
    UnknownScatter(String),
    #[error("Unsupported export format: {0} (expected glb, obj or fbx)")]
    UnsupportedFormat(String),
}
