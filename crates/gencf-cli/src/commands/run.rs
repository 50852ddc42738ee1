use std::path::Path;

use anyhow::Result;
use gencf_cli::cli::{ClassifierArgs, EiaKeyArgs, GeoArgs, PeriodArgs};
use gencf_cli::common::{build_classifier, build_fetcher};
use gencf_cli::config::GencfConfig;
use gencf_cli::manifest::record_manifest;
use gencf_io::write_records;
use tracing::info;

use super::enrich::enrich;
use super::fetch::{fetch_or_halt, save_raw};
use super::process::{process, process_params, reference_path};

pub fn handle(
    period: &PeriodArgs,
    geo: &GeoArgs,
    eia: &EiaKeyArgs,
    classifier: &ClassifierArgs,
    reference: Option<&Path>,
    config: &GencfConfig,
) -> Result<()> {
    let period = period.resolve()?;
    let filter = geo.filter().map_err(anyhow::Error::msg)?;
    // both credentials are checked before any request is made
    let fetcher = build_fetcher(eia.eia_api_key.as_deref(), config)?;
    let client = build_classifier(classifier, &period, config)?;
    info!(period = %period.label(), %filter, ai = client.is_some(), "starting run");

    let Some(rows) = fetch_or_halt(&fetcher, &period) else {
        return Ok(());
    };
    let raw_dump = config.output.raw_dump.as_path();
    save_raw(&rows, raw_dump)?;

    let reference = reference_path(reference, config);
    let outcome = process(&rows, &reference, &period, &filter);
    let merged_dump = config.output.merged_dump.as_path();
    if write_records(merged_dump, &outcome.records)? {
        println!(
            "Saved {} plants to {}",
            outcome.records.len(),
            merged_dump.display()
        );
    }

    let flagged = enrich(outcome.records, client.as_ref(), classifier, config)?;
    let enriched_dump = config.output.enriched_dump.as_path();
    if write_records(enriched_dump, &flagged)? {
        println!(
            "Saved {} flagged plants to {}",
            flagged.len(),
            enriched_dump.display()
        );
        let mut params = process_params(&period, &filter);
        params.push(("ai", client.is_some().to_string()));
        record_manifest(
            &[enriched_dump, merged_dump],
            "run",
            &params,
            &[raw_dump, reference.as_path()],
        )?;
    }
    Ok(())
}
