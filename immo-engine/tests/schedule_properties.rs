//! Depreciation schedule properties.
//!
//! Validates that:
//! 1. Linear schedules sum to the cost exactly and end at zero
//! 2. Prorata temporis shortens the first period and adds a final one
//! 3. Degressive amounts never increase once the schedule turns linear
//! 4. Net book value never increases, whatever the method
//! 5. Recomputing a schedule gives the same result

use std::sync::Arc;

use chrono::NaiveDate;
use immo_catalog::Catalog;
use immo_engine::{
    AssetParameters, DepreciationCalculator, DepreciationMethod, DepreciationSchedule, EngineSettings,
};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calculator(prorata: bool) -> DepreciationCalculator {
    let settings = EngineSettings {
        prorata_temporis: prorata,
        ..EngineSettings::default()
    };
    DepreciationCalculator::new(Arc::new(Catalog::syscohada()), settings)
}

fn params(code: &str, cost: Decimal, method: DepreciationMethod, life: u32, start: NaiveDate) -> AssetParameters {
    AssetParameters {
        category_code: code.into(),
        acquisition_cost: cost,
        in_service_date: start,
        method,
        useful_life: Some(life),
    }
}

fn assert_consistent(schedule: &DepreciationSchedule) {
    assert_eq!(schedule.total_depreciation(), schedule.acquisition_cost);
    assert!(schedule.final_net_book_value().is_zero());
    let mut previous_nbv = schedule.acquisition_cost;
    for (i, entry) in schedule.entries.iter().enumerate() {
        assert_eq!(entry.period_index as usize, i + 1);
        assert_eq!(entry.base_value, previous_nbv);
        assert_eq!(entry.net_book_value_end, entry.base_value - entry.depreciation_amount);
        assert!(entry.net_book_value_end <= previous_nbv);
        assert!(entry.depreciation_amount >= Decimal::ZERO);
        previous_nbv = entry.net_book_value_end;
    }
    for pair in schedule.entries.windows(2) {
        assert_eq!(pair[1].period_start, pair[0].period_end.succ_opt().unwrap());
    }
}

#[test]
fn linear_ten_thousand_over_five_years() {
    let schedule = calculator(false)
        .calculate(&params("2451", Decimal::from(10_000), DepreciationMethod::Linear, 5, date(2023, 10, 20)))
        .unwrap();
    assert_eq!(schedule.entries.len(), 5);
    assert!(schedule
        .entries
        .iter()
        .all(|e| e.depreciation_amount == Decimal::from(2_000)));
    assert_consistent(&schedule);
}

#[test]
fn linear_prorata_first_period_is_73_days() {
    let schedule = calculator(true)
        .calculate(&params("2451", Decimal::from(10_000), DepreciationMethod::Linear, 5, date(2023, 10, 20)))
        .unwrap();
    assert_eq!(schedule.entries.len(), 6);
    assert_eq!(schedule.entries[0].depreciation_amount, Decimal::from(400));
    assert_eq!(schedule.entries[0].period_end, date(2023, 12, 31));
    assert_eq!(schedule.entries[5].period_end, date(2028, 12, 31));
    assert_consistent(&schedule);
}

#[test]
fn linear_sums_exactly_for_awkward_costs() {
    let costs = [Decimal::new(100001, 2), Decimal::new(777777, 2), Decimal::from(3), Decimal::new(1, 2)];
    for prorata in [false, true] {
        for cost in costs {
            for life in 1..=12 {
                let schedule = calculator(prorata)
                    .calculate(&params("241", cost, DepreciationMethod::Linear, life, date(2024, 5, 17)))
                    .unwrap();
                assert_consistent(&schedule);
            }
        }
    }
}

#[test]
fn degressive_never_increases_after_crossover() {
    for prorata in [false, true] {
        for life in 2..=12 {
            for cost in [Decimal::from(10_000), Decimal::new(1234567, 2), Decimal::from(999)] {
                let schedule = calculator(prorata)
                    .calculate(&params("241", cost, DepreciationMethod::Degressive, life, date(2024, 8, 1)))
                    .unwrap();
                assert_consistent(&schedule);
                assert!(schedule.entries.len() <= life as usize);

                let linear_rate_from = schedule
                    .entries
                    .iter()
                    .position(|e| e.rate != schedule.annual_rate);
                if let Some(start) = linear_rate_from {
                    for pair in schedule.entries[start..].windows(2) {
                        assert!(
                            pair[1].depreciation_amount <= pair[0].depreciation_amount,
                            "life {} cost {}: {} then {}",
                            life,
                            cost,
                            pair[0].depreciation_amount,
                            pair[1].depreciation_amount
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn degressive_front_loads_depreciation() {
    let linear = calculator(false)
        .calculate(&params("241", Decimal::from(10_000), DepreciationMethod::Linear, 8, date(2024, 1, 1)))
        .unwrap();
    let degressive = calculator(false)
        .calculate(&params("241", Decimal::from(10_000), DepreciationMethod::Degressive, 8, date(2024, 1, 1)))
        .unwrap();
    assert!(degressive.entries[0].depreciation_amount > linear.entries[0].depreciation_amount);
    // life 8: statutory 2.25 -> 28.13%
    assert_eq!(degressive.annual_rate, Decimal::new(2813, 2));
}

#[test]
fn recomputation_is_idempotent() {
    let calc = calculator(true);
    let p = params("2442", Decimal::new(345678, 2), DepreciationMethod::Degressive, 4, date(2024, 2, 29));
    assert_eq!(calc.calculate(&p).unwrap(), calc.calculate(&p).unwrap());
}

#[test]
fn shifted_fiscal_year_aligns_periods() {
    let settings = EngineSettings {
        fiscal_year_start_month: 7,
        prorata_temporis: true,
        ..EngineSettings::default()
    };
    let calc = DepreciationCalculator::new(Arc::new(Catalog::syscohada()), settings);
    let schedule = calc
        .calculate(&params("2442", Decimal::from(3_000), DepreciationMethod::Linear, 3, date(2024, 1, 1)))
        .unwrap();
    assert_eq!(schedule.entries[0].period_start, date(2023, 7, 1));
    assert_eq!(schedule.entries[0].period_end, date(2024, 6, 30));
    assert_eq!(schedule.entries.len(), 4);
    assert_consistent(&schedule);
}
