use std::path::Path;

use anyhow::Result;
use gencf_algo::{classify_records, flag_counts};
use gencf_cli::cli::{ClassifierArgs, PeriodArgs};
use gencf_cli::common::{build_classifier, print_ai_summary, print_flag_table};
use gencf_cli::config::GencfConfig;
use gencf_cli::manifest::record_manifest;
use gencf_core::{BatchClassifier, EnrichedPlantRecord, FlaggedPlantRecord};
use gencf_io::{read_records, write_records, ChatClassifier};

pub fn handle(
    merged: &Path,
    period: &PeriodArgs,
    classifier: &ClassifierArgs,
    out: Option<&Path>,
    config: &GencfConfig,
) -> Result<()> {
    let period = period.resolve()?;
    let client = build_classifier(classifier, &period, config)?;
    let records: Vec<EnrichedPlantRecord> = read_records(merged)?;

    let flagged = enrich(records, client.as_ref(), classifier, config)?;
    let out = out.unwrap_or(config.output.enriched_dump.as_path());
    if write_records(out, &flagged)? {
        println!("Saved {} flagged plants to {}", flagged.len(), out.display());
        record_manifest(
            &[out],
            "enrich",
            &[
                ("period", period.api_value()),
                ("ai", client.is_some().to_string()),
            ],
            &[merged],
        )?;
    }
    Ok(())
}

/// Deterministic flags plus the AI pass when a client is configured, then the
/// summary tables.
pub fn enrich(
    records: Vec<EnrichedPlantRecord>,
    client: Option<&ChatClassifier>,
    args: &ClassifierArgs,
    config: &GencfConfig,
) -> Result<Vec<FlaggedPlantRecord>> {
    let pass = config.classifier.pass_config(args.batch_size, args.pacing_ms);
    let (flagged, summary) = classify_records(
        records,
        client.map(|c| c as &dyn BatchClassifier),
        &pass,
    );

    if let Some(summary) = &summary {
        print_ai_summary(summary);
    }
    print_flag_table(&flag_counts(&flagged))?;
    Ok(flagged)
}
