use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use gencf_algo::GeoFilter;
use gencf_core::{CensusRegion, ReportingPeriod};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gencf", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (default: ~/.gencf/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, process and classify one reporting month end to end
    Run {
        #[command(flatten)]
        period: PeriodArgs,
        #[command(flatten)]
        geo: GeoArgs,
        #[command(flatten)]
        eia: EiaKeyArgs,
        #[command(flatten)]
        classifier: ClassifierArgs,
        /// Reference CSV (overrides [reference] csv_path)
        #[arg(long, value_hint = ValueHint::FilePath)]
        reference: Option<PathBuf>,
    },
    /// Fetch raw generation rows and write the raw dump
    Fetch {
        #[command(flatten)]
        period: PeriodArgs,
        #[command(flatten)]
        eia: EiaKeyArgs,
        /// Output file (overrides [output] raw_dump)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Clean, aggregate and merge a saved raw dump
    Process {
        /// Raw dump written by `gencf fetch`
        #[arg(long, value_hint = ValueHint::FilePath)]
        raw: PathBuf,
        #[command(flatten)]
        period: PeriodArgs,
        #[command(flatten)]
        geo: GeoArgs,
        /// Reference CSV (overrides [reference] csv_path)
        #[arg(long, value_hint = ValueHint::FilePath)]
        reference: Option<PathBuf>,
        /// Output file (overrides [output] merged_dump)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Flag a saved merged dump, optionally with the AI pass
    Enrich {
        /// Merged dump written by `gencf process`
        #[arg(long, value_hint = ValueHint::FilePath)]
        merged: PathBuf,
        #[command(flatten)]
        period: PeriodArgs,
        #[command(flatten)]
        classifier: ClassifierArgs,
        /// Output file (overrides [output] enriched_dump)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
    },
    /// Flag counts of an enriched dump
    Summary {
        /// Enriched dump written by `gencf enrich` or `gencf run`
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Also write a flat table (.csv or .parquet)
        #[arg(long, value_hint = ValueHint::FilePath)]
        export: Option<PathBuf>,
    },
    /// List census regions and their states
    Regions,
}

#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Reporting month (YYYY-MM)
    #[arg(long, default_value = "2025-02")]
    pub period: ReportingPeriod,
    /// Override the number of days in the reporting window
    #[arg(long)]
    pub period_days: Option<u32>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GeoArgs {
    /// Keep only these states (comma-separated abbreviations, e.g. AL,CA)
    #[arg(long, conflicts_with = "region")]
    pub states: Option<String>,
    /// Keep only one census region (northeast, midwest, south, west)
    #[arg(long)]
    pub region: Option<CensusRegion>,
}

impl GeoArgs {
    pub fn filter(&self) -> Result<GeoFilter, String> {
        match (&self.states, self.region) {
            (Some(states), _) => GeoFilter::states_from_list(states),
            (None, Some(region)) => Ok(GeoFilter::Region(region)),
            (None, None) => Ok(GeoFilter::All),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct EiaKeyArgs {
    /// EIA open-data API key
    #[arg(long, env = "EIA_API_KEY", hide_env_values = true)]
    pub eia_api_key: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ClassifierArgs {
    /// DeepSeek API key for the AI pass
    #[arg(long, env = "DS_API_KEY", hide_env_values = true)]
    pub ds_api_key: Option<String>,
    /// Skip the AI pass and keep deterministic flags
    #[arg(long)]
    pub no_ai: bool,
    /// Plants per classification request (overrides [classifier] batch_size)
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Pause after each batch in milliseconds (overrides [classifier] pacing_ms)
    #[arg(long)]
    pub pacing_ms: Option<u64>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
