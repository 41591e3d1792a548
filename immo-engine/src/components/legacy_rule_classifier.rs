//! Legacy rule-based asset classification.
//!
//! Each rule is scored independently:
//! - Account: invoice account starts with one of the rule prefixes (+0.4)
//! - Amount: invoice reaches the rule minimum, or the floor (+0.2)
//! - Keywords: share of rule keywords found in the description (x0.3)
//! - Supplier: supplier name contains one of the rule patterns (+0.1)
//!
//! Rules strictly above the retain threshold are reported; the best one
//! supplies the suggestion. With no retained rule the classifier defers.

use std::sync::Arc;

use immo_catalog::{normalize, Catalog};
use rust_decimal::Decimal;

use crate::classifier::Classifier;
use crate::legacy_rules::LegacyRule;
use crate::ranking::sort_by_score_desc;
use crate::thresholds::{
    LEGACY_ACCOUNT_WEIGHT, LEGACY_AMOUNT_WEIGHT, LEGACY_KEYWORD_WEIGHT, LEGACY_RETAIN_THRESHOLD,
    LEGACY_SUPPLIER_WEIGHT,
};
use crate::types::{InvoiceData, MatchedRule, ScoredMatch, Suggestion};
use crate::util;

pub struct LegacyRuleClassifier {
    rules: Vec<PreparedRule>,
    catalog: Arc<Catalog>,
    capitalization_threshold: Decimal,
}

/// A rule with its keywords and supplier patterns pre-normalized.
struct PreparedRule {
    rule: LegacyRule,
    keywords: Vec<String>,
    supplier_patterns: Vec<String>,
}

struct RuleScore<'a> {
    rule: &'a LegacyRule,
    confidence: f64,
    reasoning: Vec<String>,
}

impl LegacyRuleClassifier {
    pub fn new(
        rules: Vec<LegacyRule>,
        catalog: Arc<Catalog>,
        capitalization_threshold: Decimal,
    ) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| PreparedRule {
                keywords: rule.keywords.iter().map(|k| normalize(k)).collect(),
                supplier_patterns: rule.supplier_patterns.iter().map(|p| normalize(p)).collect(),
                rule,
            })
            .collect();
        Self {
            rules,
            catalog,
            capitalization_threshold,
        }
    }

    fn score_rule<'a>(
        &self,
        prepared: &'a PreparedRule,
        invoice: &InvoiceData,
        description: &str,
        supplier: &str,
    ) -> RuleScore<'a> {
        let rule = &prepared.rule;
        let mut confidence = 0.0;
        let mut reasoning = Vec::new();
        let account = invoice.account.trim();

        // --- Account prefix ---
        if let Some(prefix) = rule
            .account_codes
            .iter()
            .find(|code| !code.is_empty() && !account.is_empty() && account.starts_with(code.as_str()))
        {
            confidence += LEGACY_ACCOUNT_WEIGHT;
            reasoning.push(format!(
                "rule {}: account {} starts with {}: +{:.2}",
                rule.id, account, prefix, LEGACY_ACCOUNT_WEIGHT
            ));
        }

        // --- Amount ---
        let minimum = rule.minimum_amount.unwrap_or(self.capitalization_threshold);
        if invoice.amount >= minimum {
            confidence += LEGACY_AMOUNT_WEIGHT;
            reasoning.push(format!(
                "rule {}: amount {} >= {}: +{:.2}",
                rule.id, invoice.amount, minimum, LEGACY_AMOUNT_WEIGHT
            ));
        }

        // --- Keywords ---
        if !prepared.keywords.is_empty() {
            let matched: Vec<&str> = prepared
                .keywords
                .iter()
                .filter(|k| !k.is_empty() && description.contains(k.as_str()))
                .map(String::as_str)
                .collect();
            if !matched.is_empty() {
                let ratio = matched.len() as f64 / prepared.keywords.len() as f64;
                let contribution = LEGACY_KEYWORD_WEIGHT * ratio;
                confidence += contribution;
                reasoning.push(format!(
                    "rule {}: {}/{} keywords matched ({}): +{:.2}",
                    rule.id,
                    matched.len(),
                    prepared.keywords.len(),
                    matched.join(", "),
                    contribution
                ));
            }
        }

        // --- Supplier ---
        if !supplier.is_empty() {
            if let Some(pattern) = prepared
                .supplier_patterns
                .iter()
                .find(|p| !p.is_empty() && supplier.contains(p.as_str()))
            {
                confidence += LEGACY_SUPPLIER_WEIGHT;
                reasoning.push(format!(
                    "rule {}: supplier matches '{}': +{:.2}",
                    rule.id, pattern, LEGACY_SUPPLIER_WEIGHT
                ));
            }
        }

        RuleScore {
            rule,
            confidence,
            reasoning,
        }
    }
}

impl Classifier for LegacyRuleClassifier {
    fn classify(&self, invoice: &InvoiceData) -> Option<ScoredMatch> {
        let description = normalize(&invoice.description);
        let supplier = normalize(&invoice.supplier);

        let mut retained: Vec<RuleScore<'_>> = self
            .rules
            .iter()
            .map(|r| self.score_rule(r, invoice, &description, &supplier))
            .filter(|s| util::exceeds(s.confidence, LEGACY_RETAIN_THRESHOLD))
            .collect();

        if retained.is_empty() {
            log::debug!("invoice {}: no legacy rule above {:.2}", invoice.id, LEGACY_RETAIN_THRESHOLD);
            return None;
        }

        sort_by_score_desc(&mut retained, |s| s.confidence);

        let matched_rules: Vec<MatchedRule> = retained
            .iter()
            .map(|s| MatchedRule {
                rule_id: s.rule.id.clone(),
                name: s.rule.name.clone(),
                category: s.rule.category.clone(),
                confidence: s.confidence,
            })
            .collect();

        let mut retained = retained.into_iter();
        let best = retained.next()?;
        let mut reasoning = best.reasoning;
        reasoning.push(format!(
            "legacy rule {} ({}) retained with confidence {:.2}",
            best.rule.id, best.rule.name, best.confidence
        ));
        for other in retained {
            reasoning.push(format!(
                "also matched rule {} with confidence {:.2}",
                other.rule.id, other.confidence
            ));
        }

        let category_label = self
            .catalog
            .classification_by_code(&best.rule.category)
            .map(|c| c.asset_category.clone())
            .unwrap_or_else(|| best.rule.name.clone());

        log::debug!(
            "invoice {}: legacy rule {} at {:.2}",
            invoice.id,
            best.rule.id,
            best.confidence
        );

        Some(ScoredMatch {
            confidence: best.confidence,
            suggestion: Suggestion {
                category: best.rule.category.clone(),
                category_label,
                useful_life: best.rule.useful_life,
                depreciation_method: best.rule.depreciation_method,
                reasoning,
            },
            matched_rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy_rules::default_rules;
    use crate::types::DepreciationMethod;
    use chrono::NaiveDate;

    fn classifier() -> LegacyRuleClassifier {
        LegacyRuleClassifier::new(
            default_rules(),
            Arc::new(Catalog::syscohada()),
            Decimal::from(500),
        )
    }

    fn invoice(account: &str, amount: i64, supplier: &str, description: &str) -> InvoiceData {
        InvoiceData {
            id: "INV-L".into(),
            amount: Decimal::from(amount),
            supplier: supplier.into(),
            description: description.into(),
            account: account.into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        }
    }

    #[test]
    fn office_supplies_match_nothing() {
        assert!(classifier()
            .classify(&invoice("601", 50, "", "Fournitures de bureau"))
            .is_none());
    }

    #[test]
    fn all_signals_reach_full_confidence() {
        // account + amount + 2/5 keywords + supplier
        let m = classifier()
            .classify(&invoice("21820", 18000, "CFAO Motors", "Camion utilitaire"))
            .unwrap();
        assert_eq!(m.suggestion.category, "2451");
        assert_eq!(m.suggestion.category_label, "Matériel automobile");
        assert_eq!(m.suggestion.useful_life, 4);
        let expected = 0.4 + 0.2 + 0.3 * 2.0 / 5.0 + 0.1;
        assert!((m.confidence - expected).abs() < 1e-9);
        assert_eq!(m.matched_rules[0].rule_id, "vehicles");
    }

    #[test]
    fn missing_minimum_uses_the_floor() {
        // software rule: no minimum of its own, floor 500 applies
        let m = classifier()
            .classify(&invoice("6058", 700, "Sage", "Licence logiciel comptable"))
            .unwrap();
        assert_eq!(m.suggestion.category, "213");
        let expected = 0.2 + 0.3 * 2.0 / 4.0 + 0.1;
        assert!((m.confidence - expected).abs() < 1e-9);
        assert!(m
            .suggestion
            .reasoning
            .iter()
            .any(|r| r == "rule software: amount 700 >= 500: +0.20"));
    }

    #[test]
    fn retained_rules_are_ranked_by_score() {
        // Machine on an equipment account with a furniture keyword too.
        let m = classifier()
            .classify(&invoice("2410", 4000, "Bosch", "Machine, chaise, armoire et table d'atelier"))
            .unwrap();
        assert_eq!(m.matched_rules.len(), 2);
        assert_eq!(m.matched_rules[0].rule_id, "industrial-equipment");
        assert_eq!(m.matched_rules[1].rule_id, "office-furniture");
        assert!(m.matched_rules[0].confidence >= m.matched_rules[1].confidence);
        assert_eq!(m.suggestion.depreciation_method, DepreciationMethod::Degressive);
    }

    #[test]
    fn threshold_is_strict() {
        // Amount (0.2) plus supplier (0.1) lands exactly on the threshold.
        let m = classifier().classify(&invoice("605", 800, "Dell Senegal", "Accessoires"));
        assert!(m.is_none());
    }
}
