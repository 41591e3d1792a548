use std::collections::HashMap;

use chrono::Utc;
use immo_catalog::{AssetClassification, DepreciationInfo};
use immo_engine::{
    AssetEngine, CapitalizationOutcome, DepreciationError, DepreciationSchedule, EngineSettings,
    InvoiceData, PostingProposal,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DetectJson<'a> {
    generated_at: String,
    run_ms: u128,
    settings: &'a EngineSettings,
    invoices: Vec<InvoiceJson<'a>>,
    summary: SummaryJson,
}

#[derive(Serialize)]
struct InvoiceJson<'a> {
    invoice: &'a InvoiceData,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a CapitalizationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    postings: Vec<PostingProposal>,
}

#[derive(Serialize)]
struct SummaryJson {
    invoices_processed: usize,
    assets_detected: usize,
    capitalized: usize,
    expensed: usize,
    failed: usize,
    capitalized_amount: Decimal,
}

#[derive(Serialize)]
pub struct ScheduleJson<'a> {
    pub schedule: &'a DepreciationSchedule,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub postings: Vec<PostingProposal>,
}

#[derive(Serialize)]
pub struct CategoryJson<'a> {
    #[serde(flatten)]
    pub classification: &'a AssetClassification,
    pub depreciation: Option<&'a DepreciationInfo>,
}

fn summarize(
    invoices: &[InvoiceData],
    outcomes: &[Result<CapitalizationOutcome, DepreciationError>],
) -> SummaryJson {
    let mut summary = SummaryJson {
        invoices_processed: invoices.len(),
        assets_detected: 0,
        capitalized: 0,
        expensed: 0,
        failed: 0,
        capitalized_amount: Decimal::ZERO,
    };
    for (invoice, outcome) in invoices.iter().zip(outcomes) {
        match outcome {
            Ok(o) => {
                if o.detection.is_asset {
                    summary.assets_detected += 1;
                }
                if o.capitalized {
                    summary.capitalized += 1;
                    summary.capitalized_amount += invoice.amount;
                } else {
                    summary.expensed += 1;
                }
            }
            Err(_) => summary.failed += 1,
        }
    }
    summary
}

pub fn build_detect_json<'a>(
    engine: &'a AssetEngine,
    invoices: &'a [InvoiceData],
    outcomes: &'a [Result<CapitalizationOutcome, DepreciationError>],
    with_postings: bool,
    run_ms: u128,
) -> DetectJson<'a> {
    let entries = invoices
        .iter()
        .zip(outcomes)
        .map(|(invoice, outcome)| match outcome {
            Ok(o) => InvoiceJson {
                invoice,
                outcome: Some(o),
                error: None,
                postings: match (&o.schedule, with_postings) {
                    (Some(schedule), true) => engine.posting_proposals(schedule),
                    _ => Vec::new(),
                },
            },
            Err(e) => InvoiceJson {
                invoice,
                outcome: None,
                error: Some(e.to_string()),
                postings: Vec::new(),
            },
        })
        .collect();

    DetectJson {
        generated_at: Utc::now().to_rfc3339(),
        run_ms,
        settings: engine.settings(),
        invoices: entries,
        summary: summarize(invoices, outcomes),
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

/// Format an amount with two decimals and space-grouped thousands.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped.chars().rev().collect::<String>(), cents)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

pub fn print_detect(
    engine: &AssetEngine,
    invoices: &[InvoiceData],
    outcomes: &[Result<CapitalizationOutcome, DepreciationError>],
    with_schedules: bool,
    with_postings: bool,
) {
    let summary = summarize(invoices, outcomes);

    println!();
    println!(
        "  {} invoices  \u{00b7}  {} assets detected  \u{00b7}  {} capitalized ({})  \u{00b7}  {} expensed",
        summary.invoices_processed,
        summary.assets_detected,
        summary.capitalized,
        format_amount(summary.capitalized_amount),
        summary.expensed
    );
    println!(
        "  capitalization floor {}  \u{00b7}  default method {}",
        format_amount(engine.settings().capitalization_threshold),
        engine.settings().default_depreciation_method
    );
    println!();
    println!("  {:\u{2500}<96}", "");
    println!(
        "     {:12} {:>14}  {:5}  {:8}  {:32}  {}",
        "invoice", "amount", "conf", "category", "label", "source"
    );
    println!("  {:\u{2500}<96}", "");

    for (invoice, outcome) in invoices.iter().zip(outcomes) {
        match outcome {
            Ok(o) => {
                let marker = if o.capitalized {
                    "\u{2714}"
                } else if o.detection.is_asset {
                    "?"
                } else {
                    " "
                };
                let d = &o.detection;
                println!(
                    "  {}  {:12} {:>14}  {:.2}  {:8}  {:32}  {}",
                    marker,
                    truncate(&invoice.id, 12),
                    format_amount(invoice.amount),
                    d.confidence,
                    if d.suggestions.category.is_empty() { "-" } else { d.suggestions.category.as_str() },
                    truncate(&d.suggestions.category_label, 32),
                    d.source
                );
                log::debug!("{}: {}", invoice.id, d.suggestions.reasoning.join("; "));
            }
            Err(e) => {
                println!(
                    "  !  {:12} {:>14}  error: {}",
                    truncate(&invoice.id, 12),
                    format_amount(invoice.amount),
                    e
                );
            }
        }
    }
    println!("  {:\u{2500}<96}", "");
    println!("  \u{2714} capitalized   ? asset below the capitalization bar   ! failed");

    if with_schedules {
        for (invoice, outcome) in invoices.iter().zip(outcomes) {
            if let Ok(CapitalizationOutcome {
                schedule: Some(schedule),
                ..
            }) = outcome
            {
                println!();
                println!("  {} \u{2014} {}", invoice.id, truncate(&invoice.description, 60));
                print_schedule(schedule);
                if with_postings {
                    print_postings(&engine.posting_proposals(schedule));
                }
            }
        }
    }
}

pub fn print_schedule(schedule: &DepreciationSchedule) {
    println!();
    print!(
        "  category {}  \u{00b7}  {}  \u{00b7}  {} years at {}%",
        schedule.category_code, schedule.method, schedule.useful_life, schedule.annual_rate
    );
    if let Some(coefficient) = schedule.coefficient {
        print!(" (coefficient {})", coefficient);
    }
    println!(
        "  \u{00b7}  cost {}  \u{00b7}  in service {}",
        format_amount(schedule.acquisition_cost),
        schedule.in_service_date
    );
    println!("  {:\u{2500}<96}", "");
    println!(
        "  {:>3}  {:10}  {:10}  {:>14}  {:>7}  {:>14}  {:>14}  {:>14}",
        "#", "start", "end", "base", "rate", "dotation", "accumulated", "net value"
    );
    for e in &schedule.entries {
        println!(
            "  {:>3}  {:10}  {:10}  {:>14}  {:>7}  {:>14}  {:>14}  {:>14}",
            e.period_index,
            e.period_start.to_string(),
            e.period_end.to_string(),
            format_amount(e.base_value),
            format!("{}%", e.rate),
            format_amount(e.depreciation_amount),
            format_amount(e.accumulated_depreciation),
            format_amount(e.net_book_value_end)
        );
    }
    println!("  {:\u{2500}<96}", "");
}

pub fn print_postings(postings: &[PostingProposal]) {
    if postings.is_empty() {
        return;
    }
    println!("  postings:");
    for p in postings {
        println!(
            "    {}  D {:6} C {:6} {:>14}  {}",
            p.date,
            p.debit_account,
            p.credit_account,
            format_amount(p.amount),
            p.label
        );
    }
}

pub fn print_category(c: &AssetClassification, info: Option<&DepreciationInfo>) {
    println!();
    println!("  {} \u{2014} {}", c.category_code, c.asset_category);
    println!("  {}", c.asset_class);
    if !c.content.is_empty() {
        println!("  {}", c.content);
    }
    println!();
    if c.is_non_depreciable() {
        println!("  not depreciable");
    } else {
        println!(
            "  useful life {}-{} years (default {})  \u{00b7}  rate {}%-{}% (default {}%)",
            c.useful_life_years.min,
            c.useful_life_years.max,
            c.default_useful_life,
            c.depreciation_rate.min,
            c.depreciation_rate.max,
            c.default_depreciation_rate
        );
    }
    if let Some(info) = info {
        println!(
            "  account {}  \u{00b7}  depreciation account {}",
            info.account, info.depreciation_account
        );
    }
    if !c.equivalent_accounts.is_empty() {
        println!("  also matches accounts {}", c.equivalent_accounts.join(", "));
    }
    if !c.examples.is_empty() {
        println!("  examples: {}", c.examples.join(", "));
    }
    println!();
}

pub fn print_catalog(entries: &[&AssetClassification]) {
    if entries.is_empty() {
        println!("  No matching category.");
        return;
    }

    let mut by_class: Vec<(&str, Vec<&AssetClassification>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for c in entries {
        let slot = *index.entry(c.asset_class.as_str()).or_insert_with(|| {
            by_class.push((c.asset_class.as_str(), Vec::new()));
            by_class.len() - 1
        });
        by_class[slot].1.push(c);
    }

    for (class, categories) in by_class {
        println!();
        println!("  {}", class);
        for c in categories {
            let life = if c.is_non_depreciable() {
                "not depreciable".to_string()
            } else {
                format!(
                    "{}-{} y, default {} y at {}%",
                    c.useful_life_years.min,
                    c.useful_life_years.max,
                    c.default_useful_life,
                    c.default_depreciation_rate
                )
            };
            println!("    {:6} {:52} {}", c.category_code, truncate(&c.asset_category, 52), life);
        }
    }
    println!();
}

pub fn print_timing(load_ms: u128, run_ms: u128) {
    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} Engine ran in {}ms \u{00b7} Total {}ms",
        load_ms,
        run_ms,
        load_ms + run_ms
    );
    println!();
}
