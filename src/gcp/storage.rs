//! Cloud Storage uploader.

use reqwest::Client;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::gcp::auth::GcpCredentials;
use crate::pipeline::ObjectStore;

#[cfg(test)]
mod tests;

pub const GCS_BASE_URL: &str = "https://storage.googleapis.com";

/// Uploads a local file into a bucket via the JSON API's simple media
/// upload. An existing object under the same name is replaced outright;
/// there are no resumable or partial semantics.
pub struct GcsClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GcsClient {
    pub fn new(credentials: &GcpCredentials) -> Self {
        Self {
            client: Client::new(),
            access_token: credentials.access_token.clone(),
            base_url: GCS_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn upload_file(&self, bucket: &str, local_path: &Path, object_name: &str) -> Result<()> {
        let body = tokio::fs::read(local_path).await?;
        let url = format!("{}/upload/storage/v1/b/{}/o", self.base_url, bucket);

        self.client
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object_name)])
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        info!(
            "File {} uploaded as {} in bucket {}",
            local_path.display(),
            object_name,
            bucket
        );
        Ok(())
    }
}

impl ObjectStore for GcsClient {
    async fn upload(&self, bucket: &str, local_path: &Path, object_name: &str) -> Result<()> {
        self.upload_file(bucket, local_path, object_name).await
    }
}
