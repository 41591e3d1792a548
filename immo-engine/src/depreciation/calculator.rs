//! Depreciation schedule calculator.
//!
//! Methods:
//! - Linear: `cost / life` per period. With prorata temporis and a
//!   mid-period start, the first period is scaled by the share of days in
//!   service and one extra period absorbs the remainder.
//! - Degressive: declining balance at `coefficient x 100 / life` percent
//!   of the opening net book value, switching to linear on the remaining
//!   value once that is larger. Prorata scales the first period only.
//!
//! The last period always takes whatever net book value is left, so the
//! total equals the acquisition cost exactly.

use std::sync::Arc;

use chrono::NaiveDate;
use immo_catalog::{calculate_depreciation_rate, AssetClassification, Catalog};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::periods::FiscalPeriod;
use super::schedule::{DepreciationSchedule, DepreciationScheduleEntry};
use crate::error::{DepreciationError, DepreciationResult};
use crate::settings::EngineSettings;
use crate::thresholds::{
    DEGRESSIVE_COEFFICIENT_MAX, DEGRESSIVE_COEFFICIENT_MIN, MAX_USEFUL_LIFE,
    STATUTORY_COEFFICIENT_LONG, STATUTORY_COEFFICIENT_MEDIUM, STATUTORY_COEFFICIENT_SHORT,
};
use crate::types::DepreciationMethod;
use crate::util::{ceil_money, round_money};

/// What the calculator needs to know about one asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetParameters {
    pub category_code: String,
    pub acquisition_cost: Decimal,
    pub in_service_date: NaiveDate,
    pub method: DepreciationMethod,
    /// Overrides the category default when set.
    #[serde(default)]
    pub useful_life: Option<u32>,
}

pub struct DepreciationCalculator {
    catalog: Arc<Catalog>,
    settings: EngineSettings,
}

/// Running totals while emitting entries.
struct Ledger {
    cost: Decimal,
    accumulated: Decimal,
    entries: Vec<DepreciationScheduleEntry>,
}

impl Ledger {
    fn new(cost: Decimal) -> Self {
        Self {
            cost,
            accumulated: Decimal::ZERO,
            entries: Vec::new(),
        }
    }

    fn net_book_value(&self) -> Decimal {
        self.cost - self.accumulated
    }

    fn is_exhausted(&self) -> bool {
        self.accumulated >= self.cost
    }

    fn push(&mut self, period: &FiscalPeriod, rate: Decimal, amount: Decimal) {
        let base_value = self.net_book_value();
        let amount = amount.max(Decimal::ZERO).min(base_value);
        self.accumulated += amount;
        self.entries.push(DepreciationScheduleEntry {
            period_index: self.entries.len() as u32 + 1,
            period_start: period.start,
            period_end: period.end,
            base_value,
            rate,
            depreciation_amount: amount,
            accumulated_depreciation: self.accumulated,
            net_book_value_end: self.net_book_value(),
        });
    }
}

impl DepreciationCalculator {
    pub fn new(catalog: Arc<Catalog>, settings: EngineSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Compute the full schedule. Inputs are validated before any entry
    /// is produced.
    pub fn calculate(&self, params: &AssetParameters) -> DepreciationResult<DepreciationSchedule> {
        let classification = self
            .catalog
            .classification_by_code(&params.category_code)
            .ok_or_else(|| DepreciationError::CategoryNotFound(params.category_code.clone()))?;

        if classification.is_non_depreciable() {
            return Err(DepreciationError::NotDepreciable(params.category_code.clone()));
        }
        // Whole cents only, so the entries sum to the cost as given.
        let cost = round_money(params.acquisition_cost);
        if cost <= Decimal::ZERO || cost != params.acquisition_cost {
            return Err(DepreciationError::InvalidCost(params.acquisition_cost));
        }
        let useful_life = params.useful_life.unwrap_or(classification.default_useful_life);
        if useful_life == 0 || useful_life > MAX_USEFUL_LIFE {
            return Err(DepreciationError::InvalidUsefulLife {
                code: params.category_code.clone(),
                useful_life,
            });
        }
        if !classification.useful_life_years.contains(useful_life) {
            log::warn!(
                "useful life {} outside the {}..={} years allowed for {}",
                useful_life,
                classification.useful_life_years.min,
                classification.useful_life_years.max,
                classification.category_code
            );
        }

        let first = FiscalPeriod::containing(params.in_service_date, self.settings.fiscal_year_start_month);
        let fraction = if self.settings.prorata_temporis {
            first.fraction_from(params.in_service_date)
        } else {
            Decimal::ONE
        };

        let (annual_rate, coefficient, entries) = match params.method {
            DepreciationMethod::Linear => {
                let rate = calculate_depreciation_rate(useful_life);
                (rate, None, linear(cost, useful_life, rate, first, fraction))
            }
            DepreciationMethod::Degressive => {
                let coefficient = self.coefficient_for(useful_life);
                let rate = round_money(coefficient * Decimal::ONE_HUNDRED / Decimal::from(useful_life));
                (
                    rate,
                    Some(coefficient),
                    degressive(cost, useful_life, rate, first, fraction),
                )
            }
        };

        log::debug!(
            "{} schedule for {}: {} over {} years, {} periods",
            params.method,
            classification.category_code,
            cost,
            useful_life,
            entries.len()
        );

        Ok(DepreciationSchedule {
            category_code: classification.category_code.clone(),
            method: params.method,
            useful_life,
            annual_rate,
            coefficient,
            acquisition_cost: cost,
            in_service_date: params.in_service_date,
            entries,
        })
    }

    /// Parameters for a category using its defaults and the configured
    /// default method.
    pub fn default_parameters(
        &self,
        classification: &AssetClassification,
        acquisition_cost: Decimal,
        in_service_date: NaiveDate,
    ) -> AssetParameters {
        AssetParameters {
            category_code: classification.category_code.clone(),
            acquisition_cost,
            in_service_date,
            method: self.settings.default_depreciation_method,
            useful_life: None,
        }
    }

    /// Configured coefficient, or the statutory one for the useful life,
    /// clamped to the allowed bounds.
    fn coefficient_for(&self, useful_life: u32) -> Decimal {
        let hundredths = match useful_life {
            5 | 6 => STATUTORY_COEFFICIENT_MEDIUM,
            life if life > 6 => STATUTORY_COEFFICIENT_LONG,
            _ => STATUTORY_COEFFICIENT_SHORT,
        };
        let coefficient = self
            .settings
            .degressive_coefficient
            .unwrap_or_else(|| Decimal::new(hundredths, 2));
        coefficient.clamp(
            Decimal::new(DEGRESSIVE_COEFFICIENT_MIN, 2),
            Decimal::new(DEGRESSIVE_COEFFICIENT_MAX, 2),
        )
    }
}

fn linear(
    cost: Decimal,
    useful_life: u32,
    rate: Decimal,
    first: FiscalPeriod,
    fraction: Decimal,
) -> Vec<DepreciationScheduleEntry> {
    let annual = cost / Decimal::from(useful_life);
    let prorata = fraction < Decimal::ONE;
    let periods = if prorata { useful_life + 1 } else { useful_life };

    let mut ledger = Ledger::new(cost);
    let mut period = first;
    for index in 1..=periods {
        if ledger.is_exhausted() {
            break;
        }
        let amount = if index == periods {
            ledger.net_book_value()
        } else if index == 1 {
            round_money(annual * fraction)
        } else {
            round_money(annual)
        };
        ledger.push(&period, rate, amount);
        period = period.next();
    }
    ledger.entries
}

fn degressive(
    cost: Decimal,
    useful_life: u32,
    rate: Decimal,
    first: FiscalPeriod,
    fraction: Decimal,
) -> Vec<DepreciationScheduleEntry> {
    let mut ledger = Ledger::new(cost);
    let mut period = first;
    let mut switched = false;

    for index in 1..=useful_life {
        if ledger.is_exhausted() {
            break;
        }
        let opening = ledger.net_book_value();
        let remaining = useful_life - index + 1;
        let scale = if index == 1 { fraction } else { Decimal::ONE };

        let declining = round_money(opening * rate / Decimal::ONE_HUNDRED * scale);
        let straight = ceil_money(opening / Decimal::from(remaining) * scale);
        if !switched && straight > declining {
            switched = true;
            log::debug!("degressive schedule switches to linear at period {}", index);
        }

        let (period_rate, amount) = if index == useful_life {
            (calculate_depreciation_rate(remaining), opening)
        } else if switched {
            (calculate_depreciation_rate(remaining), straight)
        } else {
            (rate, declining)
        };
        ledger.push(&period, period_rate, amount);
        period = period.next();
    }
    ledger.entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_calculator(settings: EngineSettings) -> DepreciationCalculator {
        DepreciationCalculator::new(Arc::new(Catalog::syscohada()), settings)
    }

    fn make_params(code: &str, cost: i64, method: DepreciationMethod, life: Option<u32>) -> AssetParameters {
        AssetParameters {
            category_code: code.into(),
            acquisition_cost: Decimal::from(cost),
            in_service_date: date(2023, 10, 20),
            method,
            useful_life: life,
        }
    }

    #[test]
    fn linear_without_prorata() {
        let schedule = make_calculator(EngineSettings::default())
            .calculate(&make_params("2451", 10_000, DepreciationMethod::Linear, Some(5)))
            .unwrap();
        assert_eq!(schedule.entries.len(), 5);
        for entry in &schedule.entries {
            assert_eq!(entry.depreciation_amount, Decimal::from(2000));
            assert_eq!(entry.rate, Decimal::from(20));
        }
        assert_eq!(schedule.entries[0].period_start, date(2023, 1, 1));
        assert!(schedule.final_net_book_value().is_zero());
    }

    #[test]
    fn linear_with_prorata_adds_a_final_period() {
        let settings = EngineSettings {
            prorata_temporis: true,
            ..EngineSettings::default()
        };
        let schedule = make_calculator(settings)
            .calculate(&make_params("2451", 10_000, DepreciationMethod::Linear, Some(5)))
            .unwrap();
        assert_eq!(schedule.entries.len(), 6);
        assert_eq!(schedule.entries[0].depreciation_amount, Decimal::from(400));
        assert_eq!(schedule.entries[1].depreciation_amount, Decimal::from(2000));
        assert_eq!(schedule.entries[5].depreciation_amount, Decimal::from(1600));
        assert_eq!(schedule.total_depreciation(), Decimal::from(10_000));
    }

    #[test]
    fn linear_rounding_is_absorbed_by_last_period() {
        let schedule = make_calculator(EngineSettings::default())
            .calculate(&make_params("2442", 1000, DepreciationMethod::Linear, Some(3)))
            .unwrap();
        let amounts: Vec<Decimal> = schedule.entries.iter().map(|e| e.depreciation_amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::new(33333, 2), Decimal::new(33333, 2), Decimal::new(33334, 2)]
        );
    }

    #[test]
    fn degressive_switches_to_linear() {
        // life 5, statutory coefficient 1.75 -> 35%
        let schedule = make_calculator(EngineSettings::default())
            .calculate(&make_params("241", 10_000, DepreciationMethod::Degressive, None))
            .unwrap();
        assert_eq!(schedule.coefficient, Some(Decimal::new(175, 2)));
        assert_eq!(schedule.annual_rate, Decimal::from(35));
        let amounts: Vec<Decimal> = schedule.entries.iter().map(|e| e.depreciation_amount).collect();
        // 3500, 2275, 1478.75, then linear on 2746.25 over 2 periods
        assert_eq!(amounts[0], Decimal::from(3500));
        assert_eq!(amounts[1], Decimal::from(2275));
        assert_eq!(amounts[2], Decimal::new(147875, 2));
        assert_eq!(amounts[3], Decimal::new(137313, 2));
        assert_eq!(amounts[4], Decimal::new(137312, 2));
        assert_eq!(schedule.total_depreciation(), Decimal::from(10_000));
    }

    #[test]
    fn configured_coefficient_is_clamped() {
        let settings = EngineSettings {
            degressive_coefficient: Some(Decimal::from(5)),
            ..EngineSettings::default()
        };
        let schedule = make_calculator(settings)
            .calculate(&make_params("241", 10_000, DepreciationMethod::Degressive, Some(10)))
            .unwrap();
        assert_eq!(schedule.coefficient, Some(Decimal::new(35, 1)));
        assert_eq!(schedule.annual_rate, Decimal::from(35));
    }

    #[test]
    fn degressive_prorata_scales_first_period_only() {
        let settings = EngineSettings {
            prorata_temporis: true,
            ..EngineSettings::default()
        };
        let schedule = make_calculator(settings)
            .calculate(&make_params("241", 10_000, DepreciationMethod::Degressive, None))
            .unwrap();
        assert_eq!(schedule.entries.len(), 5);
        // 35% x 73/365
        assert_eq!(schedule.entries[0].depreciation_amount, Decimal::from(700));
        assert_eq!(schedule.total_depreciation(), Decimal::from(10_000));
    }

    #[test]
    fn validation_happens_first() {
        let calc = make_calculator(EngineSettings::default());
        assert_eq!(
            calc.calculate(&make_params("999", 1000, DepreciationMethod::Linear, None)),
            Err(DepreciationError::CategoryNotFound("999".into()))
        );
        assert_eq!(
            calc.calculate(&make_params("221", 1000, DepreciationMethod::Linear, None)),
            Err(DepreciationError::NotDepreciable("221".into()))
        );
        assert_eq!(
            calc.calculate(&make_params("2442", 0, DepreciationMethod::Linear, None)),
            Err(DepreciationError::InvalidCost(Decimal::ZERO))
        );
        assert!(matches!(
            calc.calculate(&make_params("2442", 1000, DepreciationMethod::Linear, Some(0))),
            Err(DepreciationError::InvalidUsefulLife { useful_life: 0, .. })
        ));
    }

    #[test]
    fn costs_must_be_whole_cents() {
        let calc = make_calculator(EngineSettings::default());
        let mut params = make_params("2442", 0, DepreciationMethod::Linear, None);

        params.acquisition_cost = Decimal::new(4, 3);
        assert_eq!(calc.calculate(&params), Err(DepreciationError::InvalidCost(Decimal::new(4, 3))));

        params.acquisition_cost = Decimal::new(100005, 3);
        assert_eq!(calc.calculate(&params), Err(DepreciationError::InvalidCost(Decimal::new(100005, 3))));

        // trailing zeros are still whole cents
        params.acquisition_cost = Decimal::new(1000500, 4);
        let schedule = calc.calculate(&params).unwrap();
        assert_eq!(schedule.acquisition_cost, Decimal::new(10005, 2));
        assert_eq!(schedule.total_depreciation(), Decimal::new(10005, 2));
        assert!(schedule.final_net_book_value().is_zero());
    }

    #[test]
    fn useful_life_is_capped() {
        let settings = EngineSettings {
            prorata_temporis: true,
            ..EngineSettings::default()
        };
        let calc = make_calculator(settings);
        for method in [DepreciationMethod::Linear, DepreciationMethod::Degressive] {
            assert!(matches!(
                calc.calculate(&make_params("2442", 1000, method, Some(u32::MAX))),
                Err(DepreciationError::InvalidUsefulLife { useful_life: u32::MAX, .. })
            ));
            assert!(matches!(
                calc.calculate(&make_params("2442", 1000, method, Some(MAX_USEFUL_LIFE + 1))),
                Err(DepreciationError::InvalidUsefulLife { .. })
            ));
        }
        let longest = calc
            .calculate(&make_params("2442", 1000, DepreciationMethod::Linear, Some(MAX_USEFUL_LIFE)))
            .unwrap();
        assert_eq!(longest.entries.len(), MAX_USEFUL_LIFE as usize + 1);
        assert_eq!(longest.total_depreciation(), Decimal::from(1000));
    }

    #[test]
    fn postings_balance_each_entry() {
        let catalog = Catalog::syscohada();
        let schedule = make_calculator(EngineSettings::default())
            .calculate(&make_params("2442", 3000, DepreciationMethod::Linear, None))
            .unwrap();
        let classification = catalog.classification_by_code("2442").unwrap();
        let postings = schedule.posting_proposals(classification);
        assert_eq!(postings.len(), 3);
        assert!(postings.iter().all(|p| p.debit_account == "6813"));
        assert!(postings.iter().all(|p| p.credit_account == "28442"));
        let total: Decimal = postings.iter().map(|p| p.amount).sum();
        assert_eq!(total, Decimal::from(3000));

        let software = catalog.classification_by_code("213").unwrap();
        assert_eq!(crate::depreciation::posting::dotation_account(software), "6812");
    }
}
