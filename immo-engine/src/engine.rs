//! End-to-end processing of purchase invoices.
//!
//! Detection, then the capitalization gate, then (for capitalized
//! purchases) the depreciation schedule built from the suggestion.

use std::sync::Arc;

use immo_catalog::Catalog;
use rayon::prelude::*;
use serde::Serialize;

use crate::depreciation::{AssetParameters, DepreciationCalculator, DepreciationSchedule, PostingProposal};
use crate::error::{DepreciationError, DepreciationResult};
use crate::gate::CapitalizationGate;
use crate::pipelines::asset_detection::AssetDetector;
use crate::settings::EngineSettings;
use crate::types::{DetectionResult, InvoiceData};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CapitalizationOutcome {
    pub invoice_id: String,
    pub detection: DetectionResult,
    pub capitalized: bool,
    /// Present for capitalized, depreciable purchases.
    pub schedule: Option<DepreciationSchedule>,
}

pub struct AssetEngine {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
    detector: AssetDetector,
    gate: CapitalizationGate,
    calculator: DepreciationCalculator,
}

impl AssetEngine {
    pub fn new(catalog: Arc<Catalog>, settings: EngineSettings) -> Self {
        let detector = AssetDetector::new(Arc::clone(&catalog), &settings);
        let gate = CapitalizationGate::new(settings.capitalization_threshold);
        let calculator = DepreciationCalculator::new(Arc::clone(&catalog), settings.clone());
        Self {
            catalog,
            settings,
            detector,
            gate,
            calculator,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn detector(&self) -> &AssetDetector {
        &self.detector
    }

    pub fn gate(&self) -> &CapitalizationGate {
        &self.gate
    }

    pub fn calculator(&self) -> &DepreciationCalculator {
        &self.calculator
    }

    pub fn process(&self, invoice: &InvoiceData) -> DepreciationResult<CapitalizationOutcome> {
        let detection = self.detector.detect(invoice);
        let capitalized = self.gate.decide(invoice, &detection);

        let schedule = if capitalized {
            let params = AssetParameters {
                category_code: detection.suggestions.category.clone(),
                acquisition_cost: invoice.amount,
                in_service_date: invoice.date,
                method: detection.suggestions.depreciation_method,
                useful_life: Some(detection.suggestions.useful_life),
            };
            match self.calculator.calculate(&params) {
                Ok(schedule) => Some(schedule),
                Err(DepreciationError::NotDepreciable(code)) => {
                    log::warn!(
                        "invoice {}: capitalized in non-depreciable category {}, no schedule",
                        invoice.id,
                        code
                    );
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(CapitalizationOutcome {
            invoice_id: invoice.id.clone(),
            detection,
            capitalized,
            schedule,
        })
    }

    /// Process many invoices in parallel. Output order follows input order.
    pub fn process_batch(&self, invoices: &[InvoiceData]) -> Vec<DepreciationResult<CapitalizationOutcome>> {
        let outcomes: Vec<_> = invoices.par_iter().map(|i| self.process(i)).collect();

        let capitalized = outcomes
            .iter()
            .filter(|o| matches!(o, Ok(outcome) if outcome.capitalized))
            .count();
        let failed = outcomes.iter().filter(|o| o.is_err()).count();
        log::info!(
            "processed {} invoices: {} capitalized, {} expensed, {} failed",
            outcomes.len(),
            capitalized,
            outcomes.len() - capitalized - failed,
            failed
        );
        outcomes
    }

    /// Posting proposals for a schedule, using its category's accounts.
    pub fn posting_proposals(&self, schedule: &DepreciationSchedule) -> Vec<PostingProposal> {
        self.catalog
            .classification_by_code(&schedule.category_code)
            .map(|c| schedule.posting_proposals(c))
            .unwrap_or_default()
    }
}
