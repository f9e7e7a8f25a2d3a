//! Fantasy Football Historical Standings ETL
//!
//! A batch job that pulls historical league standings from the ESPN Fantasy
//! Football API, flattens them into one row per team-season, writes a local
//! CSV, uploads it to a Google Cloud Storage bucket, and loads the object
//! into a BigQuery table (full truncate-and-replace each run).
//!
//! ## Pipeline
//!
//! The run is strictly sequential: create the header-only CSV, loop over the
//! season range appending each year's standings, upload the file, then block
//! on a BigQuery load job. Any error aborts the rest of the run; reruns are
//! safe because every sink is fully overwritten.
//!
//! ```rust,no_run
//! use ffl_standings_etl::{
//!     commands::run_etl::handle_run_etl, config::EtlConfig, SeasonRange,
//! };
//!
//! # async fn example() -> ffl_standings_etl::Result<()> {
//! let config = EtlConfig::from_env("/opt/airflow".into())?;
//! handle_run_etl(&config, SeasonRange::new(2008, 2018), false).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Required: `ESPN_FFL_LEAGUE_ID`, `FFL_LEAGUE_NICKNAME`, `FFL_BUCKET_NAME`,
//! `FFL_TABLE_ID`, `GCP_ACCESS_TOKEN`. Optional: `ESPN_S2`/`ESPN_SWID`
//! (private leagues), `GOOGLE_APPLICATION_CREDENTIALS`, `FFL_ZERO_GAMES`,
//! and the `FFL_NOTIFY_*` SMTP settings.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod espn;
pub mod gcp;
pub mod notify;
pub mod pipeline;
pub mod table;
pub mod transform;

// Re-export commonly used types
pub use cli::types::{LeagueId, Season, SeasonRange};
pub use config::EtlConfig;
pub use error::{EtlError, Result};
pub use espn::types::TeamSeason;
pub use transform::{OutputRow, ZeroGamesPolicy};
