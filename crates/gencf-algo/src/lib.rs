//! # gencf-algo: Plant Generation Pipeline
//!
//! Turns raw monthly facility-fuel rows into per-plant records with a
//! capacity factor and an anomaly flag.
//!
//! ## Stages
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Clean | [`clean`] | rows without roll-ups, blanks or placeholders |
//! | Aggregate | [`aggregate`] | one record per plant with a fuel breakdown |
//! | Merge | [`merge`] | left join with reference attributes + capacity factor |
//! | Filter | [`geo`] | optional state / census-region selection |
//! | Classify | [`classify`] | deterministic `No_Data` / `Normal` / `Unusual_*` |
//! | Review | [`ai_review`] | batched `AI_*` overrides via a [`gencf_core::BatchClassifier`] |
//!
//! [`pipeline`] chains the stages. Everything here is pure and in-memory
//! except [`ai_review`], which calls out through the classifier trait and
//! sleeps between batches.
//!
//! ## Example
//!
//! ```ignore
//! use gencf_algo::{classify_records, process_rows, AiPassConfig, GeoFilter};
//! use gencf_core::{ReferenceTable, ReportingPeriod};
//!
//! let period: ReportingPeriod = "2025-02".parse()?;
//! let outcome = process_rows(&rows, &ReferenceTable::empty(), &period, &GeoFilter::All);
//! let (flagged, _) = classify_records(outcome.records, None, &AiPassConfig::default());
//! ```

pub mod aggregate;
pub mod ai_review;
pub mod capacity_factor;
pub mod classify;
pub mod clean;
pub mod geo;
pub mod merge;
pub mod pipeline;

pub use aggregate::{aggregate_plants, combined_fuel_description, MIXED_FUEL_DESCRIPTION};
pub use ai_review::{apply_ai_pass, AiPassConfig, AiPassSummary, BatchFailure};
pub use capacity_factor::capacity_factor_percent;
pub use classify::{deterministic_flag, flag_counts, flag_records, FuelRule};
pub use clean::{clean_rows, clean_rows_with_report, CleanReport};
pub use geo::{apply_geo_filter, GeoFilter};
pub use merge::{compose_address, merge_reference, MergeStats, MergedField, Precedence};
pub use pipeline::{classify_records, process_rows, ProcessOutcome, ProcessStats};
