//! Type-safe wrappers for CLI and configuration values.

pub mod ids;
pub mod time;

pub use ids::LeagueId;
pub use time::{Season, SeasonRange};
