//! Row transformer: one raw team-season record into one output row.

use serde::Serialize;

use crate::cli::types::Season;
use crate::error::{EtlError, Result};
use crate::espn::types::TeamSeason;


/// What to do with a team whose wins + losses + ties == 0.
///
/// The historical data should never contain such a team, but the derived
/// fields divide by total games, so the case needs an explicit policy
/// instead of a silent divide-by-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroGamesPolicy {
    /// Abort the run with [`EtlError::ZeroGames`].
    #[default]
    Fail,
    /// Drop the team's row from the output.
    Skip,
    /// Emit the row with `win_pct` and `ppg` set to 0.0.
    ZeroFill,
}

impl std::str::FromStr for ZeroGamesPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            "zero-fill" | "zero_fill" | "zerofill" => Ok(Self::ZeroFill),
            other => Err(format!(
                "unknown zero-games policy '{other}' (expected fail, skip, or zero-fill)"
            )),
        }
    }
}

/// One row of the output table.
///
/// Field order here is the column order of the CSV and of the warehouse
/// table; `serde` serializes struct fields in declaration order, so this
/// struct is the single source of truth for row layout. The header row is
/// written separately from [`crate::table::standings_schema`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub year: u16,
    pub owner: String,
    pub team_name: String,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub win_pct: f64,
    pub pts_for: f64,
    pub ppg: f64,
    pub pts_against: f64,
    pub playoff_finish: u8,
    pub reg_season_finish: u8,
}

/// Flatten one team's season record into an output row.
///
/// Pure function. Derived fields:
/// - `games = wins + losses + ties`
/// - `win_pct = (wins + ties/2) / games`
/// - `ppg = pts_for / games`
///
/// Returns `Ok(None)` only under [`ZeroGamesPolicy::Skip`].
pub fn transform(
    record: &TeamSeason,
    year: Season,
    policy: ZeroGamesPolicy,
) -> Result<Option<OutputRow>> {
    let games = record.wins + record.losses + record.ties;

    let (win_pct, ppg) = if games == 0 {
        match policy {
            ZeroGamesPolicy::Fail => {
                return Err(EtlError::ZeroGames {
                    team: record.team_name.clone(),
                    year: year.as_u16(),
                });
            }
            ZeroGamesPolicy::Skip => return Ok(None),
            ZeroGamesPolicy::ZeroFill => (0.0, 0.0),
        }
    } else {
        let games = f64::from(games);
        (
            (f64::from(record.wins) + f64::from(record.ties) / 2.0) / games,
            record.points_for / games,
        )
    };

    Ok(Some(OutputRow {
        year: year.as_u16(),
        owner: record.owner.clone(),
        team_name: record.team_name.clone(),
        wins: record.wins,
        losses: record.losses,
        ties: record.ties,
        win_pct,
        pts_for: record.points_for,
        ppg,
        pts_against: record.points_against,
        playoff_finish: record.final_standing,
        reg_season_finish: record.standing,
    }))
}
