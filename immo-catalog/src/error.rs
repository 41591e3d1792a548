//! Catalog error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate category code: {0}")]
    DuplicateCode(String),

    #[error("Invalid useful life range for {code}: {min}..={max}")]
    InvalidLifeRange { code: String, min: u32, max: u32 },

    #[error("Default useful life {default} outside {min}..={max} for {code}")]
    DefaultOutsideRange {
        code: String,
        default: u32,
        min: u32,
        max: u32,
    },

    #[error("Empty category code for '{0}'")]
    EmptyCode(String),

    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
