//! Terminal run notification: the operator-facing hook fired once per run.
//!
//! Mirrors the email step of the external weekly schedule: on success the
//! operator gets the resulting CSV attached, on failure the error text.
//! When no SMTP settings are configured the outcome is logged instead.

use std::path::PathBuf;

use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use crate::cli::types::SeasonRange;
use crate::config::{EmailNotifyConfig, EtlConfig};
use crate::error::Result;

/// Terminal state of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Success {
        range: SeasonRange,
        rows_loaded: u64,
        output_path: PathBuf,
    },
    Failure {
        range: SeasonRange,
        error: String,
    },
}

#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, outcome: &RunOutcome) -> Result<()>;
}

/// Default hook: one structured log line per run.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn notify(&self, outcome: &RunOutcome) -> Result<()> {
        match outcome {
            RunOutcome::Success {
                range,
                rows_loaded,
                output_path,
            } => info!(
                "Run {range} succeeded: {rows_loaded} rows loaded, file at {}",
                output_path.display()
            ),
            RunOutcome::Failure { range, error } => error!("Run {range} failed: {error}"),
        }
        Ok(())
    }
}

/// Emails the operator on both success and failure, attaching the CSV when
/// the run produced one.
pub struct EmailNotifier {
    config: EmailNotifyConfig,
    subject: String,
}

impl EmailNotifier {
    pub fn new(config: EmailNotifyConfig, league_nickname: &str) -> Self {
        Self {
            config,
            subject: format!("{league_nickname} Historical Records"),
        }
    }

    async fn send(&self, outcome: &RunOutcome) -> Result<()> {
        let builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.to_address.parse()?);

        let email = match outcome {
            RunOutcome::Success {
                rows_loaded,
                output_path,
                ..
            } => {
                let csv = tokio::fs::read(output_path).await?;
                let file_name = output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "standings.csv".to_string());
                let attachment =
                    Attachment::new(file_name).body(csv, ContentType::parse("text/csv")?);
                builder.subject(&self.subject).multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(
                            format!(
                                "Attached is the CSV file with historical records ({rows_loaded} rows loaded).",
                            ),
                        ))
                        .singlepart(attachment),
                )?
            }
            RunOutcome::Failure { range, error } => builder
                .subject(format!("{} - FAILED", self.subject))
                .body(format!("Run for seasons {range} failed:\n\n{error}"))?,
        };

        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .credentials(creds)
            .build();

        let response = mailer.send(email).await?;
        info!("Notification email sent ({})", response.code());
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    async fn notify(&self, outcome: &RunOutcome) -> Result<()> {
        self.send(outcome).await
    }
}

/// Hook selected from configuration: email when SMTP settings exist,
/// otherwise the log line.
pub enum RunNotifier {
    Log(LogNotifier),
    Email(EmailNotifier),
}

impl RunNotifier {
    pub fn from_config(config: &EtlConfig) -> Self {
        match &config.notify {
            Some(email) => Self::Email(EmailNotifier::new(
                email.clone(),
                &config.league_nickname,
            )),
            None => Self::Log(LogNotifier),
        }
    }
}

impl Notifier for RunNotifier {
    async fn notify(&self, outcome: &RunOutcome) -> Result<()> {
        match self {
            Self::Log(n) => n.notify(outcome).await,
            Self::Email(n) => n.notify(outcome).await,
        }
    }
}
