//! Helpers shared by the `gencf` subcommands.

use crate::cli::{ClassifierArgs, PeriodArgs};
use crate::config::GencfConfig;
use anyhow::Result;
use gencf_algo::AiPassSummary;
use gencf_core::{GencfResult, MissingCredential, ReportingPeriod};
use gencf_io::{ChatClassifier, EiaGenerationFetcher};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;
use tabwriter::TabWriter;

impl PeriodArgs {
    /// The reporting period with `--period-days` applied.
    pub fn resolve(&self) -> GencfResult<ReportingPeriod> {
        match self.period_days {
            Some(days) => self.period.with_days(days),
            None => Ok(self.period),
        }
    }
}

/// A non-blank credential value or the error naming how to supply it.
pub fn require_credential(
    value: Option<&str>,
    name: &str,
    flag: &str,
) -> Result<String, MissingCredential> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| MissingCredential::new(name, flag))
}

pub fn build_fetcher(
    api_key: Option<&str>,
    config: &GencfConfig,
) -> GencfResult<EiaGenerationFetcher> {
    let key = require_credential(api_key, "EIA_API_KEY", "eia-api-key")?;
    Ok(EiaGenerationFetcher::new(key)
        .with_base_url(config.eia.base_url.clone())
        .with_page_length(config.eia.page_length)
        .with_timeout(Duration::from_secs(config.eia.timeout_secs)))
}

/// `None` when `--no-ai` is given; otherwise the key must be present.
pub fn build_classifier(
    args: &ClassifierArgs,
    period: &ReportingPeriod,
    config: &GencfConfig,
) -> GencfResult<Option<ChatClassifier>> {
    if args.no_ai {
        return Ok(None);
    }
    let key = require_credential(args.ds_api_key.as_deref(), "DS_API_KEY", "ds-api-key")?;
    Ok(Some(ChatClassifier::new(
        key,
        period.label(),
        config.classifier.client_config(),
    )))
}

pub fn print_flag_table(counts: &BTreeMap<String, usize>) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "FLAG\tPLANTS")?;
    for (flag, count) in counts {
        writeln!(writer, "{}\t{}", flag, count)?;
    }
    writeln!(writer, "TOTAL\t{}", counts.values().sum::<usize>())?;
    writer.flush()?;
    Ok(())
}

pub fn print_ai_summary(summary: &AiPassSummary) {
    println!("AI analysis");
    println!("  Plants analyzed:        {}", summary.analyzed);
    println!("  In successful batches:  {}", summary.succeeded);
    println!("  In failed batches:      {}", summary.failed);
    println!("  Success rate:           {:.1}%", summary.success_rate());
    println!("  Relabeled:              {}", summary.relabeled);
}
