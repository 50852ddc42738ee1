use std::path::{Path, PathBuf};

use anyhow::Result;
use gencf_algo::{process_rows, GeoFilter, ProcessOutcome};
use gencf_cli::cli::{GeoArgs, PeriodArgs};
use gencf_cli::config::GencfConfig;
use gencf_cli::manifest::record_manifest;
use gencf_core::{RawGenerationRow, ReportingPeriod};
use gencf_io::{load_reference_or_empty, read_records, write_records};
use tracing::warn;

pub fn handle(
    raw: &Path,
    period: &PeriodArgs,
    geo: &GeoArgs,
    reference: Option<&Path>,
    out: Option<&Path>,
    config: &GencfConfig,
) -> Result<()> {
    let period = period.resolve()?;
    let filter = geo.filter().map_err(anyhow::Error::msg)?;
    let rows: Vec<RawGenerationRow> = read_records(raw)?;
    let reference = reference_path(reference, config);

    let outcome = process(&rows, &reference, &period, &filter);
    let out = out.unwrap_or(config.output.merged_dump.as_path());
    if write_records(out, &outcome.records)? {
        println!("Saved {} plants to {}", outcome.records.len(), out.display());
        record_manifest(
            &[out],
            "process",
            &process_params(&period, &filter),
            &[raw, reference.as_path()],
        )?;
    }
    Ok(())
}

pub fn reference_path(explicit: Option<&Path>, config: &GencfConfig) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.reference.csv_path.clone())
}

/// Clean, aggregate, merge and filter, printing the stage counts.
pub fn process(
    rows: &[RawGenerationRow],
    reference: &Path,
    period: &ReportingPeriod,
    filter: &GeoFilter,
) -> ProcessOutcome {
    let (table, diagnostics) = load_reference_or_empty(reference);
    if diagnostics.has_issues() {
        warn!("reference table: {}", diagnostics.summary());
    }

    let outcome = process_rows(rows, &table, period, filter);
    let stats = &outcome.stats;
    println!(
        "Cleaned {} rows: kept {}, dropped {}",
        stats.clean.input_rows,
        stats.clean.retained_rows,
        stats.clean.dropped()
    );
    println!(
        "Aggregated {} plants: {} matched reference, {} API only, {} with capacity factor",
        stats.plants, stats.merge.matched, stats.merge.api_only, stats.merge.with_capacity_factor
    );
    println!("Selected {} plants ({})", stats.after_filter, filter);
    outcome
}

pub fn process_params(period: &ReportingPeriod, filter: &GeoFilter) -> Vec<(&'static str, String)> {
    vec![
        ("period", period.api_value()),
        ("period_days", period.days().to_string()),
        ("filter", filter.to_string()),
    ]
}
