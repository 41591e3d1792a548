//! Hand-authored capitalization rules predating the catalog.
//!
//! Each rule recognizes a family of purchases from account prefixes,
//! keywords and supplier names, and points at a catalog category.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::DepreciationMethod;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyRule {
    pub id: String,
    pub name: String,
    /// Account prefixes, e.g. `"2183"` also matches `"21831"`.
    pub account_codes: Vec<String>,
    /// Falls back to the capitalization floor when absent.
    #[serde(default)]
    pub minimum_amount: Option<Decimal>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub supplier_patterns: Vec<String>,
    /// Catalog category code suggested by this rule.
    pub category: String,
    pub useful_life: u32,
    pub depreciation_method: DepreciationMethod,
}

struct RuleDefinition {
    id: &'static str,
    name: &'static str,
    accounts: &'static [&'static str],
    minimum_amount: Option<i64>,
    keywords: &'static [&'static str],
    suppliers: &'static [&'static str],
    category: &'static str,
    useful_life: u32,
    method: DepreciationMethod,
}

const RULES: &[RuleDefinition] = &[
    RuleDefinition {
        id: "computer-equipment",
        name: "Computer equipment",
        accounts: &["2183", "2442"],
        minimum_amount: Some(500),
        keywords: &["ordinateur", "laptop", "portable", "serveur", "imprimante", "ecran"],
        suppliers: &["dell", "hp", "lenovo", "apple", "asus", "acer"],
        category: "2442",
        useful_life: 3,
        method: DepreciationMethod::Linear,
    },
    RuleDefinition {
        id: "vehicles",
        name: "Vehicles",
        accounts: &["2182", "2451"],
        minimum_amount: Some(2000),
        keywords: &["vehicule", "voiture", "camion", "moto", "utilitaire"],
        suppliers: &["toyota", "peugeot", "renault", "nissan", "cfao"],
        category: "2451",
        useful_life: 4,
        method: DepreciationMethod::Linear,
    },
    RuleDefinition {
        id: "office-furniture",
        name: "Office furniture",
        accounts: &["2184", "2444"],
        minimum_amount: Some(300),
        keywords: &["mobilier", "bureau", "chaise", "fauteuil", "armoire", "table"],
        suppliers: &["ikea", "bureau vallee"],
        category: "2444",
        useful_life: 10,
        method: DepreciationMethod::Linear,
    },
    RuleDefinition {
        id: "industrial-equipment",
        name: "Industrial equipment",
        accounts: &["2154", "241"],
        minimum_amount: Some(1000),
        keywords: &["machine", "outillage", "equipement", "compresseur", "groupe electrogene"],
        suppliers: &["caterpillar", "bosch", "makita", "hilti"],
        category: "241",
        useful_life: 5,
        method: DepreciationMethod::Degressive,
    },
    RuleDefinition {
        id: "software",
        name: "Software",
        accounts: &["205", "213"],
        minimum_amount: None,
        keywords: &["logiciel", "licence", "abonnement pluriannuel", "erp"],
        suppliers: &["microsoft", "sage", "oracle", "sap"],
        category: "213",
        useful_life: 3,
        method: DepreciationMethod::Linear,
    },
    RuleDefinition {
        id: "building-works",
        name: "Building works",
        accounts: &["231", "234", "235"],
        minimum_amount: Some(5000),
        keywords: &["travaux", "renovation", "amenagement", "construction", "climatisation"],
        suppliers: &["btp", "construction"],
        category: "235",
        useful_life: 10,
        method: DepreciationMethod::Linear,
    },
];

/// The built-in rule set, in evaluation order.
pub fn default_rules() -> Vec<LegacyRule> {
    RULES
        .iter()
        .map(|r| LegacyRule {
            id: r.id.to_string(),
            name: r.name.to_string(),
            account_codes: r.accounts.iter().map(|s| s.to_string()).collect(),
            minimum_amount: r.minimum_amount.map(Decimal::from),
            keywords: r.keywords.iter().map(|s| s.to_string()).collect(),
            supplier_patterns: r.suppliers.iter().map(|s| s.to_string()).collect(),
            category: r.category.to_string(),
            useful_life: r.useful_life,
            depreciation_method: r.method,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use immo_catalog::Catalog;

    #[test]
    fn every_rule_points_at_a_catalog_category() {
        let catalog = Catalog::syscohada();
        for rule in default_rules() {
            let c = catalog
                .classification_by_code(&rule.category)
                .unwrap_or_else(|| panic!("rule {} has unknown category", rule.id));
            assert!(
                catalog.validate_useful_life(&c.category_code, rule.useful_life),
                "rule {} suggests an out-of-range life",
                rule.id
            );
        }
    }

    #[test]
    fn rule_ids_are_unique() {
        let rules = default_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rules.len());
    }
}
