//! Run orchestrator: the fixed extract → upload → load sequence.
//!
//! The weekly trigger and its email step live in the external scheduler;
//! this module models only the run itself as a declarative stage list
//! ([`STAGES`]) driven in order, plus a notification hook fired once at the
//! terminal state. Execution is strictly sequential: any error aborts the
//! remaining stages with no rollback of the partially written file, the
//! uploaded object, or the warehouse table. Reruns are safe because every
//! sink is fully overwritten — but two concurrent runs against the same
//! path, object key, and table race destructively (last writer wins,
//! undetected). Nothing here enforces mutual exclusion; the weekly schedule
//! is what normally keeps a single run in flight.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cli::types::{Season, SeasonRange};
use crate::config::EtlConfig;
use crate::error::Result;
use crate::espn::types::TeamSeason;
use crate::notify::{Notifier, RunOutcome};
use crate::table::{self, standings_schema, TableSchema};
use crate::transform::transform;


/// Where season standings come from. The production implementation is
/// [`crate::espn::EspnClient`]; tests substitute stubs.
#[allow(async_fn_in_trait)]
pub trait StandingsSource {
    async fn fetch_season(&self, season: Season) -> Result<Vec<TeamSeason>>;
}

/// Destination for the local file, keyed by bucket + object name. Uploads
/// replace any existing object outright.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    async fn upload(&self, bucket: &str, local_path: &Path, object_name: &str) -> Result<()>;
}

/// Warehouse that can copy a CSV object into a table, truncating prior
/// contents. Returns the number of rows loaded.
#[allow(async_fn_in_trait)]
pub trait Warehouse {
    async fn load_csv(
        &self,
        object_uri: &str,
        table_id: &str,
        schema: Option<&TableSchema>,
    ) -> Result<u64>;
}

/// One stage of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Create the header-only local CSV, truncating any previous file.
    Init,
    /// Fetch, transform, and append each season in the range.
    Extract,
    /// Push the finished CSV to the object store.
    Upload,
    /// Copy the uploaded object into the warehouse table.
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Extract => "extract",
            Stage::Upload => "upload",
            Stage::Load => "load",
        };
        f.write_str(name)
    }
}

/// The whole topology. No branching, fan-out, retries, or skips.
pub const STAGES: [Stage; 4] = [Stage::Init, Stage::Extract, Stage::Upload, Stage::Load];

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub output_path: PathBuf,
    /// Data rows written to the local file (header excluded).
    pub rows_written: usize,
    /// Rows the warehouse reported loading.
    pub rows_loaded: u64,
}

/// Drive the stage list for `range`.
pub async fn run<S, O, W>(
    source: &S,
    store: &O,
    warehouse: &W,
    config: &EtlConfig,
    range: SeasonRange,
) -> Result<PipelineReport>
where
    S: StandingsSource,
    O: ObjectStore,
    W: Warehouse,
{
    let output_path = config.output_file_path();
    let schema = standings_schema();
    let mut rows_written = 0usize;
    let mut rows_loaded = 0u64;

    for stage in STAGES {
        match stage {
            Stage::Init => {
                table::create(&output_path, &schema)?;
            }
            Stage::Extract => {
                for season in range.iter() {
                    info!("Loading data for {season}...");
                    let standings = source.fetch_season(season).await?;
                    let mut rows = Vec::with_capacity(standings.len());
                    for record in &standings {
                        if let Some(row) = transform(record, season, config.zero_games)? {
                            rows.push(row);
                        }
                    }
                    table::append(&output_path, &rows)?;
                    rows_written += rows.len();
                }
                info!(
                    "Local file complete: {} ({} rows)",
                    output_path.display(),
                    rows_written
                );
            }
            Stage::Upload => {
                store
                    .upload(&config.bucket_name, &output_path, &config.output_file_name())
                    .await?;
            }
            Stage::Load => {
                rows_loaded = warehouse
                    .load_csv(&config.object_uri(), &config.table_id, Some(&schema))
                    .await?;
            }
        }
    }

    Ok(PipelineReport {
        output_path,
        rows_written,
        rows_loaded,
    })
}

/// Run the pipeline and fire the notification hook at the terminal state.
///
/// The hook is invoked exactly once, on success or on the first error. A
/// failed notification is logged and swallowed so it can never mask the run
/// outcome.
pub async fn run_notified<S, O, W, N>(
    source: &S,
    store: &O,
    warehouse: &W,
    notifier: &N,
    config: &EtlConfig,
    range: SeasonRange,
) -> Result<PipelineReport>
where
    S: StandingsSource,
    O: ObjectStore,
    W: Warehouse,
    N: Notifier,
{
    let result = run(source, store, warehouse, config, range).await;

    let outcome = match &result {
        Ok(report) => RunOutcome::Success {
            range,
            rows_loaded: report.rows_loaded,
            output_path: report.output_path.clone(),
        },
        Err(error) => RunOutcome::Failure {
            range,
            error: error.to_string(),
        },
    };
    if let Err(e) = notifier.notify(&outcome).await {
        warn!("Run notification failed: {e}");
    }

    result
}
