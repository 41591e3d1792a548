//! Catalog-driven asset classification.
//!
//! Scores an invoice against every catalog category by summing three
//! independent signals:
//! - Account: the invoice account equals or prefix-matches the category
//!   account (or one of its equivalent accounts)
//! - Keywords: share of category examples found in the description
//! - Amount: the invoice reaches the capitalization floor
//!
//! The best category wins; ties keep catalog order. A best score below
//! the attempt threshold defers to the next classifier.

use std::sync::Arc;

use immo_catalog::{normalize, AssetClassification, Catalog};
use rust_decimal::Decimal;

use crate::classifier::Classifier;
use crate::thresholds::{
    ACCOUNT_MATCH_WEIGHT, AMOUNT_SIGNAL_WEIGHT, CATALOG_ATTEMPT_THRESHOLD, KEYWORD_MATCH_WEIGHT,
};
use crate::types::{DepreciationMethod, InvoiceData, ScoredMatch, Suggestion};
use crate::util;

pub struct CatalogClassifier {
    catalog: Arc<Catalog>,
    /// Normalized examples, index-aligned with the catalog entries.
    normalized_examples: Vec<Vec<String>>,
    capitalization_threshold: Decimal,
    default_method: DepreciationMethod,
}

/// Score of one category for one invoice.
#[derive(Clone, Debug)]
struct CategoryScore {
    index: usize,
    confidence: f64,
    reasoning: Vec<String>,
}

impl CatalogClassifier {
    pub fn new(
        catalog: Arc<Catalog>,
        capitalization_threshold: Decimal,
        default_method: DepreciationMethod,
    ) -> Self {
        let normalized_examples = catalog
            .all_classifications()
            .iter()
            .map(|c| c.examples.iter().map(|e| normalize(e)).collect())
            .collect();
        Self {
            catalog,
            normalized_examples,
            capitalization_threshold,
            default_method,
        }
    }

    fn score_category(
        &self,
        index: usize,
        classification: &AssetClassification,
        invoice: &InvoiceData,
        description: &str,
    ) -> CategoryScore {
        let mut confidence = 0.0;
        let mut reasoning = Vec::new();

        // --- Account ---
        if let Some(account) = classification
            .accounts()
            .find(|a| account_matches(&invoice.account, a))
        {
            confidence += ACCOUNT_MATCH_WEIGHT;
            reasoning.push(format!(
                "account {} matches {} ({}): +{:.2}",
                invoice.account.trim(),
                account,
                classification.category_code,
                ACCOUNT_MATCH_WEIGHT
            ));
        }

        // --- Keywords ---
        let examples = &self.normalized_examples[index];
        if !examples.is_empty() {
            let matched: Vec<&str> = examples
                .iter()
                .filter(|e| !e.is_empty() && description.contains(e.as_str()))
                .map(String::as_str)
                .collect();
            if !matched.is_empty() {
                let ratio = matched.len() as f64 / examples.len() as f64;
                let contribution = KEYWORD_MATCH_WEIGHT * ratio;
                confidence += contribution;
                reasoning.push(format!(
                    "{}/{} keywords matched ({}): +{:.2}",
                    matched.len(),
                    examples.len(),
                    matched.join(", "),
                    contribution
                ));
            }
        }

        // --- Amount ---
        if invoice.amount >= self.capitalization_threshold {
            confidence += AMOUNT_SIGNAL_WEIGHT;
            reasoning.push(format!(
                "amount {} >= capitalization threshold {}: +{:.2}",
                invoice.amount, self.capitalization_threshold, AMOUNT_SIGNAL_WEIGHT
            ));
        }

        CategoryScore {
            index,
            confidence,
            reasoning,
        }
    }
}

impl Classifier for CatalogClassifier {
    fn classify(&self, invoice: &InvoiceData) -> Option<ScoredMatch> {
        let description = normalize(&invoice.description);

        let mut best: Option<CategoryScore> = None;
        for (index, classification) in self.catalog.all_classifications().iter().enumerate() {
            let score = self.score_category(index, classification, invoice, &description);
            // Strict comparison keeps the first-seen category on ties.
            if best.as_ref().map_or(true, |b| score.confidence > b.confidence) {
                best = Some(score);
            }
        }

        let best = best?;
        if best.confidence <= 0.0 || util::falls_short(best.confidence, CATALOG_ATTEMPT_THRESHOLD) {
            log::debug!(
                "invoice {}: best catalog score {:.2} below {:.2}, deferring",
                invoice.id,
                best.confidence,
                CATALOG_ATTEMPT_THRESHOLD
            );
            return None;
        }

        let classification = &self.catalog.all_classifications()[best.index];
        let mut reasoning = best.reasoning;
        reasoning.push(format!(
            "best category {} - {} with confidence {:.2}",
            classification.category_code, classification.asset_category, best.confidence
        ));

        log::debug!(
            "invoice {}: catalog category {} at {:.2}",
            invoice.id,
            classification.category_code,
            best.confidence
        );

        Some(ScoredMatch {
            confidence: best.confidence,
            suggestion: Suggestion {
                category: classification.category_code.clone(),
                category_label: classification.asset_category.clone(),
                useful_life: classification.default_useful_life,
                depreciation_method: self.default_method,
                reasoning,
            },
            matched_rules: Vec::new(),
        })
    }
}

/// Accounts match when equal or when either is a prefix of the other
/// (a sub-account of the category account, or its parent).
pub fn account_matches(invoice_account: &str, category_account: &str) -> bool {
    let a = invoice_account.trim();
    let b = category_account.trim();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.starts_with(b) || b.starts_with(a)
}
