//! Read-only classification catalog and its query surface.
//!
//! A `Catalog` is built once (from the built-in SYSCOHADA table or a JSON
//! override) and shared by reference afterwards. Nothing here mutates it,
//! so a single instance behind an `Arc` serves any number of threads.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::classification::{AssetClassification, DepreciationInfo};
use crate::error::{CatalogError, CatalogResult};
use crate::syscohada;
use crate::text::normalize;

/// Decimal places used for rates and money throughout the system.
pub const RATE_PRECISION: u32 = 2;

#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<AssetClassification>,
}

impl Catalog {
    /// Build a catalog, checking every classification invariant.
    pub fn new(entries: Vec<AssetClassification>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            validate_entry(entry)?;
            if !seen.insert(entry.category_code.as_str()) {
                return Err(CatalogError::DuplicateCode(entry.category_code.clone()));
            }
            if entry.examples.is_empty() {
                log::warn!(
                    "Category {} has no examples, keyword matching will never fire",
                    entry.category_code
                );
            }
        }
        Ok(Self { entries })
    }

    /// The built-in SYSCOHADA table.
    pub fn syscohada() -> Self {
        Self {
            entries: syscohada::classifications(),
        }
    }

    /// Load a catalog override from a JSON array of classifications.
    pub fn from_json_reader<R: Read>(reader: R) -> CatalogResult<Self> {
        let entries: Vec<AssetClassification> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    /// Load a catalog override from a JSON file path.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// All classifications in definition order.
    pub fn all_classifications(&self) -> &[AssetClassification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn classification_by_code(&self, code: &str) -> Option<&AssetClassification> {
        self.entries.iter().find(|c| c.category_code == code)
    }

    pub fn classifications_by_class(&self, asset_class: &str) -> Vec<&AssetClassification> {
        self.entries
            .iter()
            .filter(|c| c.asset_class == asset_class)
            .collect()
    }

    /// Case- and accent-insensitive substring filter over category name,
    /// content and examples. Results keep catalog order; nothing is ranked.
    pub fn search_classifications(&self, query: &str) -> Vec<&AssetClassification> {
        let needle = normalize(query);
        self.entries
            .iter()
            .filter(|c| {
                normalize(&c.asset_category).contains(&needle)
                    || normalize(&c.content).contains(&needle)
                    || c.examples.iter().any(|e| normalize(e).contains(&needle))
            })
            .collect()
    }

    pub fn depreciation_info(&self, code: &str) -> Option<DepreciationInfo> {
        self.classification_by_code(code).map(|c| DepreciationInfo {
            useful_life: c.default_useful_life,
            depreciation_rate: c.default_depreciation_rate,
            account: c.syscohada_account.clone(),
            depreciation_account: c.depreciation_account.clone(),
        })
    }

    /// True iff the code exists and the life is acceptable for it:
    /// exactly 0 for non-depreciable categories, inside `[min, max]` otherwise.
    pub fn validate_useful_life(&self, code: &str, useful_life: u32) -> bool {
        match self.classification_by_code(code) {
            Some(c) if c.is_non_depreciable() => useful_life == 0,
            Some(c) => c.useful_life_years.contains(useful_life),
            None => false,
        }
    }

    /// Distinct asset classes in first-seen order.
    pub fn asset_classes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|c| c.asset_class.as_str())
            .filter(|class| seen.insert(*class))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::syscohada()
    }
}

/// Linear annual rate for a useful life, in percent: `100 / life`, rounded
/// to two places. A life of zero (non-depreciable) yields zero.
pub fn calculate_depreciation_rate(useful_life: u32) -> Decimal {
    if useful_life == 0 {
        return Decimal::ZERO;
    }
    (Decimal::ONE_HUNDRED / Decimal::from(useful_life))
        .round_dp_with_strategy(RATE_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn validate_entry(entry: &AssetClassification) -> CatalogResult<()> {
    if entry.category_code.trim().is_empty() {
        return Err(CatalogError::EmptyCode(entry.asset_category.clone()));
    }
    if entry.is_non_depreciable() {
        return Ok(());
    }
    let range = entry.useful_life_years;
    if range.min == 0 || range.max < range.min {
        return Err(CatalogError::InvalidLifeRange {
            code: entry.category_code.clone(),
            min: range.min,
            max: range.max,
        });
    }
    if !range.contains(entry.default_useful_life) {
        return Err(CatalogError::DefaultOutsideRange {
            code: entry.category_code.clone(),
            default: entry.default_useful_life,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}
