//! Error types for the adapters around the core.
//!
//! Parsing and payload serialization never fail; only configuration,
//! image rendering and export can.

use std::path::PathBuf;

use thiserror::Error;

/// Problems reading or interpreting a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid color '{0}' (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
}

/// Failures turning a payload into an image.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("payload cannot be encoded as a QR code: {0}")]
    Encode(String),
}

/// Failures writing images or bundles.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("archive generation failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to serialize archive manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Umbrella error for library callers that do not care which adapter failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
