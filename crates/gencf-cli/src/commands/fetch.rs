use std::path::Path;

use anyhow::Result;
use gencf_cli::cli::{EiaKeyArgs, PeriodArgs};
use gencf_cli::common::build_fetcher;
use gencf_cli::config::GencfConfig;
use gencf_cli::manifest::record_manifest;
use gencf_core::{RawGenerationRow, ReportingPeriod};
use gencf_io::{write_records, EiaGenerationFetcher};
use tracing::error;

pub fn handle(
    period: &PeriodArgs,
    eia: &EiaKeyArgs,
    out: Option<&Path>,
    config: &GencfConfig,
) -> Result<()> {
    let period = period.resolve()?;
    let fetcher = build_fetcher(eia.eia_api_key.as_deref(), config)?;
    let Some(rows) = fetch_or_halt(&fetcher, &period) else {
        return Ok(());
    };

    let out = out.unwrap_or(config.output.raw_dump.as_path());
    if save_raw(&rows, out)? {
        record_manifest(&[out], "fetch", &[("period", period.api_value())], &[])?;
    }
    Ok(())
}

/// `None` after logging when the fetch failed; the caller stops without output.
pub fn fetch_or_halt(
    fetcher: &EiaGenerationFetcher,
    period: &ReportingPeriod,
) -> Option<Vec<RawGenerationRow>> {
    match fetcher.fetch_generation(period) {
        Ok(rows) => Some(rows),
        Err(err) => {
            error!(period = %period.api_value(), "{err}; no output written");
            None
        }
    }
}

pub fn save_raw(rows: &[RawGenerationRow], out: &Path) -> Result<bool> {
    let saved = write_records(out, rows)?;
    if saved {
        println!("Saved {} raw rows to {}", rows.len(), out.display());
    }
    Ok(saved)
}
