//! CSV invoice loader.
//!
//! Parses purchase invoice exports into `InvoiceData`.
//! Expected CSV columns:
//!   id, date, supplier, description, account, amount
//!
//! Amounts accept a decimal comma and thousands separators (`1 200,50`)
//! and must be positive; dates accept ISO (`2024-03-15`) or day-first
//! (`15/03/2024`).

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{LoadError, LoadResult};
use crate::types::InvoiceData;

/// A raw CSV record, before amount and date parsing.
#[derive(Debug, Clone, Deserialize)]
struct InvoiceRecord {
    id: String,
    date: String,
    #[serde(default)]
    supplier: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    account: String,
    amount: String,
}

impl InvoiceRecord {
    fn into_invoice(self) -> LoadResult<InvoiceData> {
        let amount = parse_amount(&self.amount)
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or_else(|| LoadError::InvalidAmount {
                id: self.id.clone(),
                value: self.amount.clone(),
            })?;
        let date = parse_date(&self.date).ok_or_else(|| LoadError::InvalidDate {
            id: self.id.clone(),
            value: self.date.clone(),
        })?;
        Ok(InvoiceData {
            id: self.id,
            amount,
            supplier: self.supplier,
            description: self.description,
            account: self.account,
            date,
        })
    }
}

/// Load invoices from a CSV reader.
pub fn load_invoices<R: Read>(reader: R) -> LoadResult<Vec<InvoiceData>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut invoices = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: InvoiceRecord = result.map_err(|source| LoadError::Csv {
            line: line_num + 2,
            source,
        })?;
        invoices.push(record.into_invoice()?);
    }

    log::debug!("loaded {} invoices", invoices.len());
    Ok(invoices)
}

/// Load invoices from a CSV file path.
pub fn load_invoices_file(path: impl AsRef<Path>) -> LoadResult<Vec<InvoiceData>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_invoices(file)
}

/// Flexible amount parser: "1200", "1200.50", "1 200,50", "1,200.50".
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .collect();
    if compact.is_empty() {
        return None;
    }
    let normalized = match (compact.rfind(','), compact.rfind('.')) {
        // Both present: the last one is the decimal separator.
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        _ => compact,
    };
    normalized.parse::<Decimal>().ok()
}

/// Flexible date parser: ISO or day-first.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}
