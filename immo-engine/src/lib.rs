//! Fixed-asset capitalization and depreciation engine.
//!
//! Decides whether a purchase invoice is a SYSCOHADA fixed asset, whether
//! it must be capitalized, and computes its depreciation schedule.
//!
//! Flow:
//! 1. `AssetDetector` runs the classifier pipeline: catalog first, legacy
//!    rules when the catalog defers
//! 2. `CapitalizationGate` applies the confidence and amount thresholds
//! 3. `DepreciationCalculator` builds the schedule for capitalized assets
//!
//! `AssetEngine` wires the three together. Everything is synchronous and
//! side-effect free; loaders run before the engine is called.

pub mod classifier;
pub mod components;
pub mod depreciation;
pub mod engine;
pub mod error;
pub mod gate;
pub mod invoice_loader;
pub mod legacy_rules;
pub mod pipelines;
pub mod ranking;
pub mod settings;
pub mod thresholds;
pub mod types;
pub mod util;

pub use classifier::Classifier;
pub use depreciation::{
    AssetEvent, AssetParameters, AssetState, DepreciationCalculator, DepreciationSchedule,
    DepreciationScheduleEntry, PostingProposal,
};
pub use engine::{AssetEngine, CapitalizationOutcome};
pub use error::{DepreciationError, LoadError, SettingsError};
pub use gate::{CapitalizationGate, GateResult};
pub use invoice_loader::{load_invoices, load_invoices_file};
pub use pipelines::asset_detection::AssetDetector;
pub use settings::{EngineSettings, Parameter, ParameterValue};
pub use types::{
    DepreciationMethod, DetectionResult, DetectionSource, InvoiceData, MatchedRule, ScoredMatch,
    Suggestion,
};
