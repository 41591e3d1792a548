//! Capitalization gate: capitalize or expense.
//!
//! A purchase is capitalized when detection is confident enough (strictly
//! above 0.6, a higher bar than the 0.5 of `is_asset`) and its amount
//! reaches the capitalization floor.

use rust_decimal::Decimal;

use crate::pipelines::asset_detection::AssetDetector;
use crate::thresholds::{CAPITALIZATION_CONFIDENCE_THRESHOLD, DEFAULT_CAPITALIZATION_THRESHOLD};
use crate::types::{DetectionResult, InvoiceData};
use crate::util;

/// Result of a gate pass, partitioning invoices into capitalized and expensed.
pub struct GateResult {
    pub capitalized: Vec<(InvoiceData, DetectionResult)>,
    pub expensed: Vec<(InvoiceData, DetectionResult)>,
}

#[derive(Clone, Debug)]
pub struct CapitalizationGate {
    pub floor: Decimal,
}

impl CapitalizationGate {
    pub fn new(floor: Decimal) -> Self {
        Self { floor }
    }

    pub fn is_above_threshold(&self, amount: Decimal) -> bool {
        amount >= self.floor
    }

    /// Confidence test alone, on an existing detection.
    pub fn should_capitalize(&self, detection: &DetectionResult) -> bool {
        detection.is_asset && util::exceeds(detection.confidence, CAPITALIZATION_CONFIDENCE_THRESHOLD)
    }

    /// Run detection and apply the confidence test.
    pub fn should_trigger_capitalization(&self, detector: &AssetDetector, invoice: &InvoiceData) -> bool {
        self.should_capitalize(&detector.detect(invoice))
    }

    /// Full decision: confident detection and an amount at the floor.
    pub fn decide(&self, invoice: &InvoiceData, detection: &DetectionResult) -> bool {
        self.should_capitalize(detection) && self.is_above_threshold(invoice.amount)
    }

    pub fn partition(&self, candidates: Vec<(InvoiceData, DetectionResult)>) -> GateResult {
        let (capitalized, expensed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|(invoice, detection)| self.decide(invoice, detection));

        GateResult {
            capitalized,
            expensed,
        }
    }
}

impl Default for CapitalizationGate {
    fn default() -> Self {
        Self {
            floor: Decimal::from(DEFAULT_CAPITALIZATION_THRESHOLD),
        }
    }
}
