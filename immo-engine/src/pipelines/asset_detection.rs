use std::sync::Arc;

use immo_catalog::Catalog;
use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::components::catalog_classifier::CatalogClassifier;
use crate::components::legacy_rule_classifier::LegacyRuleClassifier;
use crate::legacy_rules::default_rules;
use crate::settings::EngineSettings;
use crate::types::{DetectionResult, DetectionSource, InvoiceData};

/// The asset detection pipeline.
///
/// Pipeline flow:
/// 1. CatalogClassifier scores the invoice against every catalog category
/// 2. LegacyRuleClassifier runs only when the catalog defers
/// 3. Nothing matched: neutral result, not an asset
///
/// Each stage is tagged with the source it reports on the result.
pub struct AssetDetector {
    classifiers: Vec<(DetectionSource, Box<dyn Classifier>)>,
}

impl AssetDetector {
    /// Catalog path first, built-in legacy rules as fallback.
    pub fn new(catalog: Arc<Catalog>, settings: &EngineSettings) -> Self {
        let classifiers: Vec<(DetectionSource, Box<dyn Classifier>)> = vec![
            (
                DetectionSource::Catalog,
                Box::new(CatalogClassifier::new(
                    Arc::clone(&catalog),
                    settings.capitalization_threshold,
                    settings.default_depreciation_method,
                )),
            ),
            (
                DetectionSource::LegacyRules,
                Box::new(LegacyRuleClassifier::new(
                    default_rules(),
                    catalog,
                    settings.capitalization_threshold,
                )),
            ),
        ];
        Self { classifiers }
    }

    /// Custom classifier stages, run in the given order.
    pub fn with_classifiers(classifiers: Vec<(DetectionSource, Box<dyn Classifier>)>) -> Self {
        Self { classifiers }
    }

    /// Names of the enabled stages, in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.classifiers.iter().map(|(_, c)| c.name()).collect()
    }

    /// Run the pipeline on one invoice. Never fails: when every stage
    /// defers the result is neutral.
    pub fn detect(&self, invoice: &InvoiceData) -> DetectionResult {
        for (source, classifier) in &self.classifiers {
            if !classifier.enable(invoice) {
                continue;
            }
            if let Some(scored) = classifier.classify(invoice) {
                return DetectionResult::from_match(&invoice.id, scored, *source);
            }
            log::debug!("invoice {}: {} deferred", invoice.id, classifier.name());
        }
        log::debug!("invoice {}: no stage matched, neutral result", invoice.id);
        DetectionResult::neutral(&invoice.id)
    }

    /// Detect many invoices in parallel. Output order follows input order.
    pub fn detect_batch(&self, invoices: &[InvoiceData]) -> Vec<DetectionResult> {
        let results: Vec<DetectionResult> = invoices.par_iter().map(|i| self.detect(i)).collect();
        let assets = results.iter().filter(|r| r.is_asset).count();
        log::info!("detected {} assets in {} invoices", assets, results.len());
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ScoredMatch, Suggestion};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn detector() -> AssetDetector {
        AssetDetector::new(Arc::new(Catalog::syscohada()), &EngineSettings::default())
    }

    fn invoice(id: &str, account: &str, amount: i64, supplier: &str, description: &str) -> InvoiceData {
        InvoiceData {
            id: id.into(),
            amount: Decimal::from(amount),
            supplier: supplier.into(),
            description: description.into(),
            account: account.into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    struct Always(f64);

    impl Classifier for Always {
        fn classify(&self, _invoice: &InvoiceData) -> Option<ScoredMatch> {
            Some(ScoredMatch {
                confidence: self.0,
                suggestion: Suggestion::neutral(),
                matched_rules: Vec::new(),
            })
        }
    }

    struct Disabled;

    impl Classifier for Disabled {
        fn enable(&self, _invoice: &InvoiceData) -> bool {
            false
        }

        fn classify(&self, _invoice: &InvoiceData) -> Option<ScoredMatch> {
            panic!("disabled classifier must not run")
        }
    }

    #[test]
    fn catalog_path_wins_when_confident() {
        let result = detector().detect(&invoice("A", "2183", 1200, "Dell", "Achat ordinateur portable Dell"));
        assert_eq!(result.source, DetectionSource::Catalog);
        assert!(result.is_asset);
        assert!(result.matched_rules.is_empty());
        assert_eq!(result.suggestions.category, "2442");
    }

    #[test]
    fn legacy_path_runs_when_catalog_defers() {
        // No catalog example nor account matches; the software rule does.
        let result = detector().detect(&invoice("B", "6058", 700, "Sage", "Licence logiciel comptable"));
        assert_eq!(result.source, DetectionSource::LegacyRules);
        assert_eq!(result.matched_rules[0].rule_id, "software");
        assert!(!result.is_asset);
    }

    #[test]
    fn nothing_matched_is_neutral() {
        let result = detector().detect(&invoice("C", "601", 50, "", "Fournitures de bureau"));
        assert_eq!(result.source, DetectionSource::None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.suggestions.category, "");
        assert_eq!(result.suggestions.useful_life, 5);
    }

    #[test]
    fn disabled_stages_are_skipped() {
        let detector = AssetDetector::with_classifiers(vec![
            (DetectionSource::Catalog, Box::new(Disabled)),
            (DetectionSource::LegacyRules, Box::new(Always(0.9))),
        ]);
        let result = detector.detect(&invoice("D", "2442", 900, "", "x"));
        assert_eq!(result.source, DetectionSource::LegacyRules);
        assert_eq!(detector.stage_names(), vec!["Disabled", "Always"]);
    }

    #[test]
    fn batch_preserves_input_order() {
        let invoices: Vec<InvoiceData> = (0..20)
            .map(|i| invoice(&format!("INV-{i}"), "2442", 1000 + i, "", "serveur"))
            .collect();
        let results = detector().detect_batch(&invoices);
        assert_eq!(results.len(), 20);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.invoice_id, format!("INV-{i}"));
        }
    }
}
