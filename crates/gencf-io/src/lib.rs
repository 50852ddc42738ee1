//! # gencf-io: Collaborators of the Generation Pipeline
//!
//! Everything that crosses a process boundary: the EIA generation API, the
//! plant reference CSV, the chat-completions classifier, and the JSON / CSV /
//! Parquet files written between stages.
//!
//! ## Module Overview
//!
//! ### Data Sources ([`sources`])
//! - [`sources::eia`] - EIA v2 facility-fuel monthly generation
//! - [`sources::deepseek`] - batched capacity-factor labelling over chat completions
//!
//! ### Files
//! - [`reference`] - `Power_Plants.csv` loader with load diagnostics
//! - [`dumps`] - raw / merged / enriched JSON record arrays
//! - [`export`] - flat summary table as CSV or Parquet
//!
//! ## Error Handling
//!
//! Network calls return typed outcomes ([`gencf_core::FetchError`],
//! [`gencf_core::ClassificationFailure`]) so callers can tell failure kinds
//! apart. The reference loader returns [`gencf_core::ReferenceLoadError`] and
//! collects per-row problems in [`gencf_core::Diagnostics`]. File helpers use
//! `anyhow` with path context.

pub mod dumps;
pub mod export;
pub mod reference;
pub mod sources;

pub use dumps::{read_records, write_records, ENRICHED_DUMP_PATH, MERGED_DUMP_PATH, RAW_DUMP_PATH};
pub use export::{flagged_to_dataframe, write_table};
pub use reference::{
    load_reference_or_empty, load_reference_table, read_reference_rows, DEFAULT_REFERENCE_PATH,
};
pub use sources::{ChatClassifier, ChatClassifierConfig, EiaGenerationFetcher};
