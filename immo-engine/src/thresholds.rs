//! Centralized detection and depreciation constants.
//!
//! Changing a weight here affects both the catalog classifier and the
//! legacy rule classifier; the two paths use different keyword weights
//! and that asymmetry is deliberate.

/// Default capitalization floor, in currency units.
pub const DEFAULT_CAPITALIZATION_THRESHOLD: i64 = 500;

// ---------------------------------------------------------------------------
// Catalog classifier weights
// ---------------------------------------------------------------------------

/// Invoice account matches the category account.
pub const ACCOUNT_MATCH_WEIGHT: f64 = 0.5;
/// Scaled by the fraction of category examples found in the description.
pub const KEYWORD_MATCH_WEIGHT: f64 = 0.4;
/// Invoice amount at or above the capitalization floor.
pub const AMOUNT_SIGNAL_WEIGHT: f64 = 0.1;
/// Best catalog score below this defers to the legacy rules.
pub const CATALOG_ATTEMPT_THRESHOLD: f64 = 0.3;

// ---------------------------------------------------------------------------
// Legacy rule weights
// ---------------------------------------------------------------------------

pub const LEGACY_ACCOUNT_WEIGHT: f64 = 0.4;
pub const LEGACY_AMOUNT_WEIGHT: f64 = 0.2;
pub const LEGACY_KEYWORD_WEIGHT: f64 = 0.3;
pub const LEGACY_SUPPLIER_WEIGHT: f64 = 0.1;
/// A rule must score strictly above this to be retained.
pub const LEGACY_RETAIN_THRESHOLD: f64 = 0.3;

// ---------------------------------------------------------------------------
// Decision thresholds
// ---------------------------------------------------------------------------

/// `is_asset` is `confidence > ASSET_CONFIDENCE_THRESHOLD`.
pub const ASSET_CONFIDENCE_THRESHOLD: f64 = 0.5;
/// Capitalization needs strictly more certainty than classification.
pub const CAPITALIZATION_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Tolerance for comparing summed weights against thresholds.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Useful life suggested when nothing matched.
pub const NEUTRAL_USEFUL_LIFE: u32 = 5;

// ---------------------------------------------------------------------------
// Depreciation
// ---------------------------------------------------------------------------

/// Degressive coefficient bounds, in hundredths.
pub const DEGRESSIVE_COEFFICIENT_MIN: i64 = 125;
pub const DEGRESSIVE_COEFFICIENT_MAX: i64 = 350;

/// Statutory coefficients by useful life, in hundredths:
/// 3-4 years, 5-6 years, more than 6 years.
pub const STATUTORY_COEFFICIENT_SHORT: i64 = 125;
pub const STATUTORY_COEFFICIENT_MEDIUM: i64 = 175;
pub const STATUTORY_COEFFICIENT_LONG: i64 = 225;

/// Decimal places for every amount in a schedule.
pub const MONEY_PRECISION: u32 = 2;

/// Longest useful life accepted, in years. Schedules emit one entry per year.
pub const MAX_USEFUL_LIFE: u32 = 100;

/// Dotation accounts debited by depreciation postings.
pub const INTANGIBLE_DOTATION_ACCOUNT: &str = "6812";
pub const TANGIBLE_DOTATION_ACCOUNT: &str = "6813";
