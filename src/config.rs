//! Run configuration, loaded from the environment and validated once at
//! startup.
//!
//! Every component takes what it needs from [`EtlConfig`] by reference;
//! nothing reads the environment after startup and there are no
//! process-wide mutable globals. League credentials and GCP identifiers are
//! never embedded in source.

use std::path::PathBuf;

use crate::cli::types::LeagueId;
use crate::error::{EtlError, Result};
use crate::gcp::bigquery::TableReference;
use crate::transform::ZeroGamesPolicy;


pub const LEAGUE_ID_ENV_VAR: &str = "ESPN_FFL_LEAGUE_ID";
pub const ESPN_S2_ENV_VAR: &str = "ESPN_S2";
pub const SWID_ENV_VAR: &str = "ESPN_SWID";
pub const LEAGUE_NICKNAME_ENV_VAR: &str = "FFL_LEAGUE_NICKNAME";
pub const BUCKET_NAME_ENV_VAR: &str = "FFL_BUCKET_NAME";
pub const TABLE_ID_ENV_VAR: &str = "FFL_TABLE_ID";
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ZERO_GAMES_ENV_VAR: &str = "FFL_ZERO_GAMES";
pub const SMTP_HOST_ENV_VAR: &str = "FFL_NOTIFY_SMTP_HOST";
pub const SMTP_USERNAME_ENV_VAR: &str = "FFL_NOTIFY_SMTP_USERNAME";
pub const SMTP_PASSWORD_ENV_VAR: &str = "FFL_NOTIFY_SMTP_PASSWORD";
pub const NOTIFY_FROM_ENV_VAR: &str = "FFL_NOTIFY_FROM";
pub const NOTIFY_TO_ENV_VAR: &str = "FFL_NOTIFY_TO";

/// ESPN session cookies for private leagues. Opaque strings issued by ESPN;
/// they expire server-side and are never validated here.
#[derive(Debug, Clone)]
pub struct EspnAuth {
    pub espn_s2: String,
    pub swid: String,
}

/// SMTP settings for the operator notification email.
#[derive(Debug, Clone)]
pub struct EmailNotifyConfig {
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub to_address: String,
}

/// Everything one run needs, resolved before any work starts.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub league_id: LeagueId,
    /// `None` for public leagues.
    pub espn_auth: Option<EspnAuth>,
    /// Short league name; names the output file and cloud object.
    pub league_nickname: String,
    pub bucket_name: String,
    /// Fully qualified `project.dataset.table`.
    pub table_id: String,
    /// Path to the GCP service-account key JSON.
    pub credentials_path: PathBuf,
    /// Base working directory from the CLI; output lands under
    /// `<base_path>/output_files/`.
    pub base_path: PathBuf,
    pub zero_games: ZeroGamesPolicy,
    /// `None` disables the email hook; the outcome is logged instead.
    pub notify: Option<EmailNotifyConfig>,
}

fn require_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(EtlError::MissingConfig {
            var: var.to_string(),
        }),
    }
}

fn optional_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl EtlConfig {
    /// Load and validate configuration from the environment.
    ///
    /// Fails fast with the offending variable name; a run never starts with
    /// a partially resolved configuration.
    pub fn from_env(base_path: PathBuf) -> Result<Self> {
        let league_id: LeagueId = require_env(LEAGUE_ID_ENV_VAR)?.parse().map_err(|e| {
            EtlError::InvalidConfig {
                var: LEAGUE_ID_ENV_VAR.to_string(),
                message: format!("{e}"),
            }
        })?;

        // Session cookies come as a pair; one without the other is a
        // misconfiguration rather than a public league.
        let espn_auth = match (optional_env(ESPN_S2_ENV_VAR), optional_env(SWID_ENV_VAR)) {
            (Some(espn_s2), Some(swid)) => Some(EspnAuth { espn_s2, swid }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(EtlError::MissingConfig {
                    var: SWID_ENV_VAR.to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(EtlError::MissingConfig {
                    var: ESPN_S2_ENV_VAR.to_string(),
                })
            }
        };

        let league_nickname = require_env(LEAGUE_NICKNAME_ENV_VAR)?;
        let bucket_name = require_env(BUCKET_NAME_ENV_VAR)?;

        // Same parse the warehouse loader uses, so a malformed table id
        // fails here instead of at the Load stage after extraction and
        // upload already ran.
        let table_id = require_env(TABLE_ID_ENV_VAR)?;
        TableReference::parse(&table_id)?;

        let credentials_path = optional_env(CREDENTIALS_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| base_path.join("service_account.json"));

        let zero_games = match optional_env(ZERO_GAMES_ENV_VAR) {
            Some(raw) => raw.parse().map_err(|message| EtlError::InvalidConfig {
                var: ZERO_GAMES_ENV_VAR.to_string(),
                message,
            })?,
            None => ZeroGamesPolicy::default(),
        };

        let notify = match optional_env(SMTP_HOST_ENV_VAR) {
            Some(smtp_host) => Some(EmailNotifyConfig {
                smtp_host,
                smtp_username: require_env(SMTP_USERNAME_ENV_VAR)?,
                smtp_password: require_env(SMTP_PASSWORD_ENV_VAR)?,
                from_address: require_env(NOTIFY_FROM_ENV_VAR)?,
                to_address: require_env(NOTIFY_TO_ENV_VAR)?,
            }),
            None => None,
        };

        Ok(Self {
            league_id,
            espn_auth,
            league_nickname,
            bucket_name,
            table_id,
            credentials_path,
            base_path,
            zero_games,
            notify,
        })
    }

    /// Name of the output CSV and of the cloud object.
    pub fn output_file_name(&self) -> String {
        format!("{}_historical.csv", self.league_nickname)
    }

    /// Local path the CSV is written to.
    pub fn output_file_path(&self) -> PathBuf {
        self.base_path
            .join("output_files")
            .join(self.output_file_name())
    }

    /// `gs://` URI of the uploaded object, as BigQuery expects it.
    pub fn object_uri(&self) -> String {
        format!("gs://{}/{}", self.bucket_name, self.output_file_name())
    }
}
