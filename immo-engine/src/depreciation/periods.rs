//! Twelve-month fiscal periods.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiscalPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FiscalPeriod {
    /// The fiscal period containing `date`, for a fiscal year opening on
    /// the first day of `start_month` (1-12).
    pub fn containing(date: NaiveDate, start_month: u32) -> Self {
        let month = start_month.clamp(1, 12);
        let year = if date.month() >= month {
            date.year()
        } else {
            date.year() - 1
        };
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);
        Self::starting(start)
    }

    fn starting(start: NaiveDate) -> Self {
        let end = start
            .checked_add_months(Months::new(12))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn next(&self) -> Self {
        Self::starting(self.end.succ_opt().unwrap_or(self.end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar days in the period, bounds included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Share of the period from `in_service` to the period end, bounds
    /// included. Dates outside the period yield a full period.
    pub fn fraction_from(&self, in_service: NaiveDate) -> Decimal {
        if !self.contains(in_service) || in_service == self.start {
            return Decimal::ONE;
        }
        let days_in_service = (self.end - in_service).num_days() + 1;
        Decimal::from(days_in_service) / Decimal::from(self.days())
    }
}
