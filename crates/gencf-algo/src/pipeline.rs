//! Stage composition: raw rows to merged records, merged records to flags.

use crate::ai_review::{apply_ai_pass, AiPassConfig, AiPassSummary};
use crate::aggregate::aggregate_plants;
use crate::classify::flag_records;
use crate::clean::{clean_rows_with_report, CleanReport};
use crate::geo::{apply_geo_filter, GeoFilter};
use crate::merge::{merge_reference, MergeStats};
use gencf_core::{
    BatchClassifier, EnrichedPlantRecord, FlaggedPlantRecord, RawGenerationRow, ReferenceTable,
    ReportingPeriod,
};
use serde::Serialize;
use tracing::info;

/// Result of clean → aggregate → merge → filter.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub records: Vec<EnrichedPlantRecord>,
    pub stats: ProcessStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessStats {
    pub clean: CleanReport,
    pub plants: usize,
    pub merge: MergeStats,
    pub after_filter: usize,
}

pub fn process_rows(
    rows: &[RawGenerationRow],
    reference: &ReferenceTable,
    period: &ReportingPeriod,
    filter: &GeoFilter,
) -> ProcessOutcome {
    let (cleaned, clean) = clean_rows_with_report(rows);
    let plants = aggregate_plants(&cleaned);
    let plant_count = plants.len();
    let (merged, merge) = merge_reference(plants, reference, period);
    let records = apply_geo_filter(merged, filter);

    let stats = ProcessStats {
        clean,
        plants: plant_count,
        merge,
        after_filter: records.len(),
    };
    info!(
        rows = stats.clean.input_rows,
        kept = stats.clean.retained_rows,
        plants = stats.plants,
        matched = stats.merge.matched,
        api_only = stats.merge.api_only,
        %filter,
        selected = stats.after_filter,
        "processed generation data"
    );
    ProcessOutcome { records, stats }
}

/// Deterministic flags, then the AI pass when a classifier is supplied.
pub fn classify_records(
    records: Vec<EnrichedPlantRecord>,
    classifier: Option<&dyn BatchClassifier>,
    config: &AiPassConfig,
) -> (Vec<FlaggedPlantRecord>, Option<AiPassSummary>) {
    let mut flagged = flag_records(records);
    let summary = classifier.map(|classifier| apply_ai_pass(&mut flagged, classifier, config));
    (flagged, summary)
}
