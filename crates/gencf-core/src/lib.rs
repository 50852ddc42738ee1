//! # gencf-core: Plant Generation Data Model
//!
//! Shared types for the monthly generation pipeline: raw API rows, per-plant
//! aggregates, reference attributes, enriched and flagged records, plus the
//! reporting period and the classification label space.
//!
//! ## Record Lifecycle
//!
//! ```text
//! RawGenerationRow ─clean/aggregate─▶ AggregatedPlantRecord
//!                                        │ + ReferenceAttributes (optional)
//!                                        ▼
//!                                  EnrichedPlantRecord ─classify─▶ FlaggedPlantRecord
//! ```
//!
//! Records are built once per run from an immutable snapshot. Only the flag of
//! a [`FlaggedPlantRecord`] changes after construction (deterministic value,
//! then an optional remote-classifier override).
//!
//! ## Modules
//!
//! - [`records`] - stage records and their serialized field names
//! - [`flags`] - `No_Data` / `Normal` / `Unusual_*` / `AI_*` labels
//! - [`period`] - reporting month and its length in hours
//! - [`units`] - MW / MWh / hour newtypes
//! - [`reference`] - plant-attributes lookup table
//! - [`regions`] - state abbreviations and census regions
//! - [`classifier`] - trait implemented by remote classification clients
//! - [`error`] / [`diagnostics`] - failures and recoverable issues

pub mod classifier;
pub mod diagnostics;
pub mod error;
pub mod flags;
pub mod period;
pub mod records;
pub mod reference;
pub mod regions;
pub mod units;

pub use classifier::{BatchClassifier, BatchOutcome, PlantSummary};
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{
    ClassificationFailure, FetchError, GencfError, GencfResult, MissingCredential,
    ReferenceLoadError,
};
pub use flags::{AiLabel, CapacityFactorFlag, FuelCategory};
pub use period::ReportingPeriod;
pub use records::{
    normalize_plant_code, AggregatedPlantRecord, DataSource, EnrichedPlantRecord,
    FlaggedPlantRecord, FuelBreakdownEntry, GenerationValue, RawGenerationRow,
    ReferenceAttributes, CAPACITY_COLUMNS,
};
pub use reference::ReferenceTable;
pub use regions::{state_abbreviation, CensusRegion};
