//! Command handlers.

pub mod run_etl;

pub use run_etl::handle_run_etl;
