//! Entry point: parse CLI, load configuration, run the ETL.

use anyhow::Context;
use clap::Parser;
use ffl_standings_etl::{
    cli::EtlArgs, commands::run_etl::handle_run_etl, config::EtlConfig, SeasonRange,
};
use tracing_subscriber::EnvFilter;

// The league switched to a new scoring system (not tracked in ESPN) in 2019,
// so the historical window is fixed: start of the league through 2018.
const HISTORICAL_RANGE: (u16, u16) = (2008, 2018);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ffl_standings_etl=info".parse().unwrap()),
        )
        .init();

    let args = EtlArgs::parse();

    let config =
        EtlConfig::from_env(args.base_path).context("failed to load run configuration")?;

    let (start, end) = HISTORICAL_RANGE;
    handle_run_etl(&config, SeasonRange::new(start, end), args.verbose)
        .await
        .context("ETL run failed")?;

    Ok(())
}
