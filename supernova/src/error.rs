//! Error types for the discovery pipeline.
//!
//! Only conditions that abort the run live here. Malformed rows, missing
//! fields and unparseable dates are absorbed by the stage that sees them.

use thiserror::Error;

/// Errors that terminate a pipeline run
#[derive(Error, Debug)]
pub enum SupernovaError {
    #[error("Catalog request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Catalog payload is unusable: {0}")]
    CatalogFormat(String),

    #[error("Malformed coordinate for {name}: '{value}' ({reason})")]
    Coordinate {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Failed to render frame {year}: {message}")]
    Render { year: i32, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the pipeline
pub type Result<T> = std::result::Result<T, SupernovaError>;
