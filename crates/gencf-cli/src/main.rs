use clap::Parser;
use gencf_cli::{
    cli::{Cli, Commands},
    config::load_config,
};
use tracing::error;
use tracing_subscriber::FmtSubscriber;
mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = dispatch(&cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run {
            period,
            geo,
            eia,
            classifier,
            reference,
        } => commands::run::handle(
            period,
            geo,
            eia,
            classifier,
            reference.as_deref(),
            &config,
        ),
        Commands::Fetch { period, eia, out } => {
            commands::fetch::handle(period, eia, out.as_deref(), &config)
        }
        Commands::Process {
            raw,
            period,
            geo,
            reference,
            out,
        } => commands::process::handle(
            raw,
            period,
            geo,
            reference.as_deref(),
            out.as_deref(),
            &config,
        ),
        Commands::Enrich {
            merged,
            period,
            classifier,
            out,
        } => commands::enrich::handle(merged, period, classifier, out.as_deref(), &config),
        Commands::Summary { file, export } => commands::summary::handle(file, export.as_deref()),
        Commands::Regions => commands::regions::handle(),
    }
}
