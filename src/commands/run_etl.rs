//! Run command: wire configuration into concrete clients and drive the
//! pipeline.

use crate::{
    cli::types::SeasonRange,
    config::EtlConfig,
    espn::EspnClient,
    gcp::{BigQueryClient, GcpCredentials, GcsClient},
    notify::RunNotifier,
    pipeline::{self, PipelineReport},
    Result,
};

/// Handle the extract-and-load run.
pub async fn handle_run_etl(
    config: &EtlConfig,
    range: SeasonRange,
    verbose: bool,
) -> Result<PipelineReport> {
    if verbose {
        println!(
            "League {} seasons {} -> {}/{} -> {}",
            config.league_id,
            range,
            config.bucket_name,
            config.output_file_name(),
            config.table_id
        );
    }

    let credentials = GcpCredentials::load(&config.credentials_path)?;
    let source = EspnClient::new(config.league_id, config.espn_auth.as_ref())?;
    let store = GcsClient::new(&credentials);
    let warehouse = BigQueryClient::new(&credentials);
    let notifier = RunNotifier::from_config(config);

    println!("Starting...");
    let report =
        pipeline::run_notified(&source, &store, &warehouse, &notifier, config, range).await?;

    println!(
        "✓ Loaded {} rows into {} ({} rows written locally to {})",
        report.rows_loaded,
        config.table_id,
        report.rows_written,
        report.output_path.display()
    );

    Ok(report)
}
