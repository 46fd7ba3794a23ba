//! Error types for the invscan-core library.
//!
//! Field extraction itself never fails; these errors cover the surfaces
//! around it (configuration files, image handling, OCR collaborators).

use thiserror::Error;

/// Main error type for the invscan library.
#[derive(Error, Debug)]
pub enum InvscanError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image preprocessing error.
    #[error("preprocessing error: {0}")]
    Preprocess(#[from] PreprocessError),

    /// Text recognition failed in the OCR collaborator.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invoice draft error.
    #[error("draft error: {0}")]
    Draft(#[from] DraftError),

    /// Image decoding or encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors related to configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A dotted key does not exist in the configuration.
    #[error("configuration key not found: {0}")]
    UnknownKey(String),
}

/// Errors related to image preprocessing.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// The image has no pixels.
    #[error("image is empty")]
    EmptyImage,
}

/// Errors related to invoice drafts.
#[derive(Error, Debug)]
pub enum DraftError {
    /// A stored date string is not an ISO calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// An amount does not fit in a decimal.
    #[error("amount overflow in {0}")]
    Overflow(&'static str),
}

/// Result type for the invscan library.
pub type Result<T> = std::result::Result<T, InvscanError>;
