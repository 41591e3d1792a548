use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::DepreciationMethod;

/// One fiscal period of a depreciation schedule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepreciationScheduleEntry {
    /// 1-based.
    pub period_index: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Net book value at period start.
    pub base_value: Decimal,
    /// Annual percent applied in this period.
    pub rate: Decimal,
    pub depreciation_amount: Decimal,
    pub accumulated_depreciation: Decimal,
    pub net_book_value_end: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepreciationSchedule {
    pub category_code: String,
    pub method: DepreciationMethod,
    pub useful_life: u32,
    /// Annual rate in percent: linear rate, or the degressive rate.
    pub annual_rate: Decimal,
    /// Coefficient used by the degressive method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<Decimal>,
    pub acquisition_cost: Decimal,
    pub in_service_date: NaiveDate,
    pub entries: Vec<DepreciationScheduleEntry>,
}

impl DepreciationSchedule {
    pub fn total_depreciation(&self) -> Decimal {
        self.entries.iter().map(|e| e.depreciation_amount).sum()
    }

    pub fn final_net_book_value(&self) -> Decimal {
        self.entries
            .last()
            .map_or(self.acquisition_cost, |e| e.net_book_value_end)
    }

    /// Net book value after every period closed on or before `date`.
    pub fn net_book_value_at(&self, date: NaiveDate) -> Decimal {
        self.entries
            .iter()
            .take_while(|e| e.period_end <= date)
            .last()
            .map_or(self.acquisition_cost, |e| e.net_book_value_end)
    }

    /// Lifecycle state implied by the schedule alone. Disposal and
    /// reform are external events, see [`AssetState::on_event`].
    pub fn state_at(&self, date: NaiveDate) -> AssetState {
        if date < self.in_service_date {
            return AssetState::NotStarted;
        }
        if self.net_book_value_at(date).is_zero() {
            AssetState::FullyDepreciated
        } else {
            AssetState::InService
        }
    }
}

// ---------------------------------------------------------------------------
// Asset lifecycle
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AssetState {
    NotStarted,
    InService,
    FullyDepreciated,
    Disposed,
    Reformed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetEvent {
    PutInService,
    DepreciationCompleted,
    /// Sold or transferred out.
    Dispose,
    /// Scrapped or withdrawn from use.
    Reform,
}

impl AssetState {
    /// Next state, or `None` when the event is invalid in this state.
    pub fn on_event(self, event: AssetEvent) -> Option<AssetState> {
        use AssetEvent::*;
        use AssetState::*;

        match (self, event) {
            (NotStarted, PutInService) => Some(InService),
            (InService, DepreciationCompleted) => Some(FullyDepreciated),
            (InService | FullyDepreciated, Dispose) => Some(Disposed),
            (InService | FullyDepreciated, Reform) => Some(Reformed),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AssetState::Disposed | AssetState::Reformed)
    }
}
