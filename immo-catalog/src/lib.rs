//! SYSCOHADA fixed-asset classification catalog.
//!
//! The catalog is reference data: a table of asset categories with their
//! useful-life and rate ranges, defaults, and ledger accounts. It is built
//! once and then only queried. The capitalization engine receives it by
//! injection and never mutates it.

pub mod catalog;
pub mod classification;
pub mod error;
pub mod syscohada;
pub mod text;

pub use catalog::{calculate_depreciation_rate, Catalog, RATE_PRECISION};
pub use classification::{AssetClassification, DepreciationInfo, RateRange, YearRange};
pub use error::{CatalogError, CatalogResult};
pub use text::normalize;
