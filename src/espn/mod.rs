//! ESPN Fantasy Football API client: typed responses and season fetch.

pub mod http;
pub mod types;

pub use http::EspnClient;
