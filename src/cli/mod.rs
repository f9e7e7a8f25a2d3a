//! CLI argument definitions and parsing.

pub mod types;

use clap::Parser;
use std::path::PathBuf;

/// Extract historical league standings and load them into GCP.
///
/// The season range is fixed at the call site in `main` (the league moved to
/// a new scoring system after 2018, so the historical window never changes);
/// there is deliberately no flag to override it.
#[derive(Debug, Parser)]
#[clap(name = "ffl-standings-etl", about = "ESPN fantasy football standings ETL")]
pub struct EtlArgs {
    /// Base working directory: the output CSV lands under
    /// `<BASE_PATH>/output_files/` and the default GCP credentials file is
    /// resolved relative to it.
    pub base_path: PathBuf,

    /// Print extra progress detail while running.
    #[clap(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests;
