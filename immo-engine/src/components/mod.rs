pub mod catalog_classifier;
pub mod legacy_rule_classifier;
