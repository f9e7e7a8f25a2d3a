//! Error types for the fantasy football standings ETL

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Required environment variable {var} not set")]
    MissingConfig { var: String },

    #[error("Invalid value for {var}: {message}")]
    InvalidConfig { var: String, message: String },

    #[error("Failed to parse numeric value: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("ESPN returned no league data for season {season}")]
    NoSeasonData { season: u16 },

    #[error("team {team} played zero games in {year}; cannot derive win_pct/ppg")]
    ZeroGames { team: String, year: u16 },

    #[error("Table id {table_id} is not fully qualified as project.dataset.table")]
    BadTableId { table_id: String },

    #[error("Service account key error: {message}")]
    Credentials { message: String },

    #[error("BigQuery load job failed: {message}")]
    LoadJob { message: String },

    #[error("Email build failed: {0}")]
    MailBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    MailAddress(#[from] lettre::address::AddressError),

    #[error("SMTP send failed: {0}")]
    MailTransport(#[from] lettre::transport::smtp::Error),

    #[error("Invalid attachment content type: {0}")]
    MailContentType(#[from] lettre::message::header::ContentTypeErr),
}
