use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inclusive range of useful lives, in whole years.
///
/// `{0, 0}` marks a non-depreciable category (land, goodwill).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: u32,
    pub max: u32,
}

impl YearRange {
    pub fn contains(&self, years: u32) -> bool {
        years >= self.min && years <= self.max
    }
}

/// Inclusive range of annual depreciation rates, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// One SYSCOHADA asset category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetClassification {
    /// Broad group, e.g. `"24 - Matériel, mobilier et actifs biologiques"`.
    pub asset_class: String,
    pub asset_category: String,
    /// Unique key within a catalog.
    pub category_code: String,
    /// What the category covers, free text.
    #[serde(default)]
    pub content: String,
    pub useful_life_years: YearRange,
    pub depreciation_rate: RateRange,
    pub default_useful_life: u32,
    pub default_depreciation_rate: Decimal,
    /// Keywords matched against invoice descriptions, in definition order.
    #[serde(default)]
    pub examples: Vec<String>,
    pub syscohada_account: String,
    pub depreciation_account: String,
    /// Codes from other charts (French PCG) that map onto this category.
    #[serde(default)]
    pub equivalent_accounts: Vec<String>,
}

impl AssetClassification {
    /// Land and other categories that are never depreciated.
    pub fn is_non_depreciable(&self) -> bool {
        self.useful_life_years.min == 0 && self.useful_life_years.max == 0
    }

    /// Every account code that identifies this category, SYSCOHADA first.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.syscohada_account.as_str())
            .chain(self.equivalent_accounts.iter().map(String::as_str))
    }

    /// The SYSCOHADA class number (`"21"`, `"24"`, ...) this category belongs to.
    pub fn class_number(&self) -> &str {
        self.syscohada_account
            .get(..2)
            .unwrap_or(self.syscohada_account.as_str())
    }
}

/// Depreciation defaults of a category, as exposed to settings forms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepreciationInfo {
    pub useful_life: u32,
    pub depreciation_rate: Decimal,
    pub account: String,
    pub depreciation_account: String,
}
