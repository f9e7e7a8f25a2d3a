//! BigQuery warehouse loader.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::gcp::auth::GcpCredentials;
use crate::pipeline::Warehouse;
use crate::table::TableSchema;


pub const BIGQUERY_BASE_URL: &str = "https://bigquery.googleapis.com";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Fully qualified table identifier, `project.dataset.table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

impl TableReference {
    pub fn parse(table_id: &str) -> Result<Self> {
        let parts: Vec<&str> = table_id.split('.').collect();
        match parts.as_slice() {
            [project, dataset, table]
                if !project.is_empty() && !dataset.is_empty() && !table.is_empty() =>
            {
                Ok(Self {
                    project_id: project.to_string(),
                    dataset_id: dataset.to_string(),
                    table_id: table.to_string(),
                })
            }
            _ => Err(EtlError::BadTableId {
                table_id: table_id.to_string(),
            }),
        }
    }
}

/// Runs CSV load jobs against the `jobs` REST resource.
///
/// Every load is a full replace (`WRITE_TRUNCATE`): after a successful run
/// the destination table holds exactly the rows of the loaded object and
/// nothing else, which is what makes whole-run reruns safe.
pub struct BigQueryClient {
    client: Client,
    access_token: String,
    project_id: String,
    base_url: String,
}

impl BigQueryClient {
    pub fn new(credentials: &GcpCredentials) -> Self {
        Self {
            client: Client::new(),
            access_token: credentials.access_token.clone(),
            project_id: credentials.key.project_id.clone(),
            base_url: BIGQUERY_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn job_config(uri: &str, table: &TableReference, schema: Option<&TableSchema>) -> Value {
        let mut load = json!({
            "sourceUris": [uri],
            "destinationTable": {
                "projectId": table.project_id,
                "datasetId": table.dataset_id,
                "tableId": table.table_id,
            },
            "sourceFormat": "CSV",
            "skipLeadingRows": 1,
            "writeDisposition": "WRITE_TRUNCATE",
        });

        match schema {
            Some(schema) => {
                let fields: Vec<Value> = schema
                    .columns()
                    .map(|(name, ty)| json!({"name": name, "type": ty.as_str()}))
                    .collect();
                load["schema"] = json!({ "fields": fields });
            }
            // No explicit schema: let BigQuery infer types from the file.
            None => load["autodetect"] = json!(true),
        }

        json!({ "configuration": { "load": load } })
    }

    /// Copy a CSV object into `table`, replacing its prior contents.
    ///
    /// Blocks until the load job reaches a terminal state and returns the
    /// number of rows loaded. A job-level failure (schema mismatch,
    /// malformed row, permission error) surfaces as [`EtlError::LoadJob`];
    /// nothing is retried and there is no partial commit.
    async fn load_job(
        &self,
        object_uri: &str,
        table: &TableReference,
        schema: Option<&TableSchema>,
    ) -> Result<u64> {
        let insert_url = format!(
            "{}/bigquery/v2/projects/{}/jobs",
            self.base_url, self.project_id
        );
        let body = Self::job_config(object_uri, table, schema);

        let inserted = self
            .client
            .post(&insert_url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let job_id = inserted
            .pointer("/jobReference/jobId")
            .and_then(Value::as_str)
            .ok_or_else(|| EtlError::LoadJob {
                message: "job insert response carried no jobReference.jobId".to_string(),
            })?
            .to_string();

        debug!(job_id = %job_id, "load job submitted, waiting for completion");
        let job = self.wait_for_job(&job_id).await?;

        if let Some(error_result) = job.pointer("/status/errorResult") {
            let reason = error_result
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let message = error_result
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            return Err(EtlError::LoadJob {
                message: format!("{reason}: {message}"),
            });
        }

        let rows = job
            .pointer("/statistics/load/outputRows")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        info!(
            "Loaded {} rows into table {}.{}",
            rows, table.dataset_id, table.table_id
        );
        Ok(rows)
    }

    /// Poll `jobs.get` until the job reports `DONE`.
    async fn wait_for_job(&self, job_id: &str) -> Result<Value> {
        let job_url = format!(
            "{}/bigquery/v2/projects/{}/jobs/{}",
            self.base_url, self.project_id, job_id
        );

        loop {
            let job = self
                .client
                .get(&job_url)
                .bearer_auth(&self.access_token)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;

            let state = job
                .pointer("/status/state")
                .and_then(Value::as_str)
                .unwrap_or("");
            if state == "DONE" {
                return Ok(job);
            }

            debug!(job_id, state, "load job still running");
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Warehouse for BigQueryClient {
    async fn load_csv(
        &self,
        object_uri: &str,
        table_id: &str,
        schema: Option<&TableSchema>,
    ) -> Result<u64> {
        let table = TableReference::parse(table_id)?;
        self.load_job(object_uri, &table, schema).await
    }
}
