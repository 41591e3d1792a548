//! Depreciation posting proposals for the accounting side.
//!
//! One balanced proposal per schedule entry, dated at the period end:
//! debit the dotation expense account, credit the category's accumulated
//! depreciation account. Nothing here touches a ledger.

use chrono::NaiveDate;
use immo_catalog::AssetClassification;
use rust_decimal::Decimal;
use serde::Serialize;

use super::schedule::DepreciationSchedule;
use crate::thresholds::{INTANGIBLE_DOTATION_ACCOUNT, TANGIBLE_DOTATION_ACCOUNT};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostingProposal {
    pub period_index: u32,
    pub date: NaiveDate,
    pub debit_account: String,
    pub credit_account: String,
    pub amount: Decimal,
    pub label: String,
}

/// Dotation account for a category: intangibles (class 21) and the rest.
pub fn dotation_account(classification: &AssetClassification) -> &'static str {
    if classification.class_number() == "21" {
        INTANGIBLE_DOTATION_ACCOUNT
    } else {
        TANGIBLE_DOTATION_ACCOUNT
    }
}

impl DepreciationSchedule {
    pub fn posting_proposals(&self, classification: &AssetClassification) -> Vec<PostingProposal> {
        let debit = dotation_account(classification);
        self.entries
            .iter()
            .filter(|e| !e.depreciation_amount.is_zero())
            .map(|e| PostingProposal {
                period_index: e.period_index,
                date: e.period_end,
                debit_account: debit.to_string(),
                credit_account: classification.depreciation_account.clone(),
                amount: e.depreciation_amount,
                label: format!(
                    "Dotation {} {} ({}/{})",
                    classification.category_code,
                    e.period_end.format("%Y"),
                    e.period_index,
                    self.entries.len()
                ),
            })
            .collect()
    }
}
