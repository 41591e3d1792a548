pub mod calculator;
pub mod periods;
pub mod posting;
pub mod schedule;

pub use calculator::{AssetParameters, DepreciationCalculator};
pub use periods::FiscalPeriod;
pub use posting::PostingProposal;
pub use schedule::{AssetEvent, AssetState, DepreciationSchedule, DepreciationScheduleEntry};
