//! Thin clients for the GCP services this job writes to.
//!
//! Both clients invoke the documented REST contracts directly (media upload
//! for Cloud Storage, load jobs for BigQuery) rather than wrapping an SDK;
//! only the two calls this pipeline needs are covered.

pub mod auth;
pub mod bigquery;
pub mod storage;

pub use auth::GcpCredentials;
pub use bigquery::BigQueryClient;
pub use storage::GcsClient;
