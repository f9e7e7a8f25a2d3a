//! GCP credentials: service-account key file plus an out-of-band token.
//!
//! The key file supplies the project id; the OAuth access token itself is
//! minted outside this system (e.g. `gcloud auth print-access-token`) and
//! handed over via `GCP_ACCESS_TOKEN`. Nothing here signs or refreshes
//! tokens, and nothing validates them beyond presence.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{EtlError, Result};

#[cfg(test)]
mod tests;

pub const ACCESS_TOKEN_ENV_VAR: &str = "GCP_ACCESS_TOKEN";

/// The fields we need from a service-account key JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub client_email: String,
}

#[derive(Debug, Clone)]
pub struct GcpCredentials {
    pub key: ServiceAccountKey,
    pub access_token: String,
}

impl GcpCredentials {
    /// Read the key file at `credentials_path` and pick up the access token
    /// from the environment.
    pub fn load(credentials_path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(credentials_path).map_err(|e| EtlError::Credentials {
            message: format!("cannot read {}: {e}", credentials_path.display()),
        })?;
        let key: ServiceAccountKey =
            serde_json::from_str(&raw).map_err(|e| EtlError::Credentials {
                message: format!("malformed key file {}: {e}", credentials_path.display()),
            })?;

        let access_token = std::env::var(ACCESS_TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| EtlError::MissingConfig {
                var: ACCESS_TOKEN_ENV_VAR.to_string(),
            })?;

        debug!(
            "Using service account {} for project {}",
            key.client_email, key.project_id
        );
        Ok(Self { key, access_token })
    }
}
