use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::thresholds::{ASSET_CONFIDENCE_THRESHOLD, NEUTRAL_USEFUL_LIFE};
use crate::util;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A purchase invoice line as handed over by the ingestion side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvoiceData {
    pub id: String,
    pub amount: Decimal,
    pub supplier: String,
    pub description: String,
    /// Chart-of-accounts code the purchase was booked to.
    pub account: String,
    pub date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Depreciation method
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepreciationMethod {
    #[default]
    #[serde(rename = "lineaire")]
    Linear,
    #[serde(rename = "degressif")]
    Degressive,
}

impl DepreciationMethod {
    /// Settings-surface identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            DepreciationMethod::Linear => "lineaire",
            DepreciationMethod::Degressive => "degressif",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lineaire" | "linéaire" | "linear" => Some(DepreciationMethod::Linear),
            "degressif" | "dégressif" | "degressive" => Some(DepreciationMethod::Degressive),
            _ => None,
        }
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Detection output
// ---------------------------------------------------------------------------

/// Which classifier produced a detection result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DetectionSource {
    Catalog,
    LegacyRules,
    /// Every classifier deferred; the result is neutral.
    None,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::Catalog => write!(f, "catalog"),
            DetectionSource::LegacyRules => write!(f, "legacy rules"),
            DetectionSource::None => write!(f, "none"),
        }
    }
}

/// What the engine proposes for a capitalized purchase.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Suggestion {
    /// Catalog category code, empty when nothing matched.
    pub category: String,
    pub category_label: String,
    pub useful_life: u32,
    pub depreciation_method: DepreciationMethod,
    /// Which signals fired and by how much, in evaluation order.
    pub reasoning: Vec<String>,
}

impl Suggestion {
    pub fn neutral() -> Self {
        Self {
            category: String::new(),
            category_label: String::new(),
            useful_life: NEUTRAL_USEFUL_LIFE,
            depreciation_method: DepreciationMethod::Linear,
            reasoning: vec!["no catalog category or legacy rule matched".to_string()],
        }
    }
}

/// A legacy rule that scored above the retain threshold.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchedRule {
    pub rule_id: String,
    pub name: String,
    pub category: String,
    pub confidence: f64,
}

/// What a single classifier returns when it does not defer.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredMatch {
    pub confidence: f64,
    pub suggestion: Suggestion,
    pub matched_rules: Vec<MatchedRule>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectionResult {
    pub invoice_id: String,
    pub is_asset: bool,
    pub confidence: f64,
    pub matched_rules: Vec<MatchedRule>,
    pub suggestions: Suggestion,
    pub source: DetectionSource,
}

impl DetectionResult {
    pub fn from_match(invoice_id: &str, scored: ScoredMatch, source: DetectionSource) -> Self {
        let confidence = scored.confidence.clamp(0.0, 1.0);
        Self {
            invoice_id: invoice_id.to_string(),
            is_asset: util::exceeds(confidence, ASSET_CONFIDENCE_THRESHOLD),
            confidence,
            matched_rules: scored.matched_rules,
            suggestions: scored.suggestion,
            source,
        }
    }

    pub fn neutral(invoice_id: &str) -> Self {
        Self {
            invoice_id: invoice_id.to_string(),
            is_asset: false,
            confidence: 0.0,
            matched_rules: Vec::new(),
            suggestions: Suggestion::neutral(),
            source: DetectionSource::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_serializes_with_settings_names() {
        assert_eq!(
            serde_json::to_string(&DepreciationMethod::Degressive).unwrap(),
            "\"degressif\""
        );
        let parsed: DepreciationMethod = serde_json::from_str("\"lineaire\"").unwrap();
        assert_eq!(parsed, DepreciationMethod::Linear);
        assert_eq!(DepreciationMethod::parse("Dégressif"), Some(DepreciationMethod::Degressive));
        assert_eq!(DepreciationMethod::parse("sum-of-years"), None);
    }

    #[test]
    fn from_match_clamps_and_flags() {
        let scored = ScoredMatch {
            confidence: 1.2,
            suggestion: Suggestion::neutral(),
            matched_rules: Vec::new(),
        };
        let result = DetectionResult::from_match("INV-1", scored, DetectionSource::Catalog);
        assert_eq!(result.confidence, 1.0);
        assert!(result.is_asset);

        let borderline = ScoredMatch {
            confidence: 0.5,
            suggestion: Suggestion::neutral(),
            matched_rules: Vec::new(),
        };
        let result = DetectionResult::from_match("INV-2", borderline, DetectionSource::Catalog);
        assert!(!result.is_asset);
    }
}
