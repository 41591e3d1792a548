//! Engine error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Raised by the depreciation calculator before any entry is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DepreciationError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Invalid useful life {useful_life} for category {code}")]
    InvalidUsefulLife { code: String, useful_life: u32 },

    #[error("Invalid acquisition cost: {0}")]
    InvalidCost(Decimal),

    #[error("Category {0} is not depreciable")]
    NotDepreciable(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Setting {key} expects a {expected} value")]
    TypeMismatch { key: String, expected: &'static str },

    #[error("Setting {key} = {value} is outside {min}..={max}")]
    OutOfBounds {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Setting {key} = '{value}' is not one of the allowed options")]
    InvalidOption { key: String, value: String },

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by the invoice CSV loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid amount '{value}' for invoice {id}")]
    InvalidAmount { id: String, value: String },

    #[error("Invalid date '{value}' for invoice {id}")]
    InvalidDate { id: String, value: String },
}

pub type DepreciationResult<T> = Result<T, DepreciationError>;
pub type SettingsResult<T> = Result<T, SettingsError>;
pub type LoadResult<T> = Result<T, LoadError>;
