use serde::Deserialize;
use std::collections::BTreeMap;


/// One league-season object from the `leagueHistory` endpoint.
///
/// The endpoint returns a JSON array of these; for a single `seasonId`
/// query it holds one element.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueSeason {
    #[serde(rename = "seasonId")]
    pub season_id: u16,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// League member (owner) as returned under `members`.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    /// Owner GUID, braces included (`{61869D6A-...}`).
    pub id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
}

impl Member {
    /// Human-readable owner name: "First Last" when available, falling back
    /// to the display name, then the raw GUID.
    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self
                .display_name
                .clone()
                .unwrap_or_else(|| self.id.clone()),
        }
    }
}

/// Raw team object under `teams`.
///
/// Older seasons carry `location` + `nickname`; newer ones a single `name`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEntry {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Owner GUIDs, resolved against the league `members` list.
    #[serde(default)]
    pub owners: Vec<String>,
    /// Regular-season seed.
    #[serde(rename = "playoffSeed", default)]
    pub playoff_seed: u8,
    /// Final rank once playoffs conclude; 0 for seasons where ESPN never
    /// computed it.
    #[serde(rename = "rankCalculatedFinal", default)]
    pub rank_calculated_final: u8,
    #[serde(default)]
    pub record: TeamRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamRecord {
    #[serde(default)]
    pub overall: OverallRecord,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverallRecord {
    #[serde(default)]
    pub wins: u16,
    #[serde(default)]
    pub losses: u16,
    #[serde(default)]
    pub ties: u16,
    #[serde(rename = "pointsFor", default)]
    pub points_for: f64,
    #[serde(rename = "pointsAgainst", default)]
    pub points_against: f64,
}

impl TeamEntry {
    /// Team display name, preferring the single `name` field and falling
    /// back to `location nickname` for pre-2019-style responses.
    pub fn team_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        let combined = format!(
            "{} {}",
            self.location.as_deref().unwrap_or(""),
            self.nickname.as_deref().unwrap_or("")
        );
        combined.trim().to_string()
    }
}

/// One team's final season statistics, flattened from the API response.
/// Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeason {
    pub owner: String,
    pub team_name: String,
    pub wins: u16,
    pub losses: u16,
    pub ties: u16,
    pub points_for: f64,
    pub points_against: f64,
    /// Playoff finish (rank after playoffs conclude).
    pub final_standing: u8,
    /// Regular-season finish (seed going into the playoffs).
    pub standing: u8,
}

impl TeamSeason {
    /// Build the domain record from a raw team entry, resolving the first
    /// owner GUID against the member index. Teams with no resolvable owner
    /// keep the raw GUID (or an empty string) so the row is still emitted.
    pub fn from_entry(entry: &TeamEntry, members: &BTreeMap<&str, &Member>) -> Self {
        let owner = entry
            .owners
            .first()
            .map(|guid| {
                members
                    .get(guid.as_str())
                    .map(|m| m.full_name())
                    .unwrap_or_else(|| guid.clone())
            })
            .unwrap_or_default();

        Self {
            owner,
            team_name: entry.team_name(),
            wins: entry.record.overall.wins,
            losses: entry.record.overall.losses,
            ties: entry.record.overall.ties,
            points_for: entry.record.overall.points_for,
            points_against: entry.record.overall.points_against,
            final_standing: entry.rank_calculated_final,
            standing: entry.playoff_seed,
        }
    }

    /// Rank used to order standings: the calculated final rank when ESPN
    /// provides one, otherwise the regular-season seed.
    pub fn standings_rank(&self) -> u8 {
        if self.final_standing > 0 {
            self.final_standing
        } else {
            self.standing
        }
    }
}

impl LeagueSeason {
    /// Flatten this league-season into domain records, ordered by final
    /// standings.
    pub fn standings(&self) -> Vec<TeamSeason> {
        let members: BTreeMap<&str, &Member> =
            self.members.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut records: Vec<TeamSeason> = self
            .teams
            .iter()
            .map(|t| TeamSeason::from_entry(t, &members))
            .collect();
        records.sort_by_key(TeamSeason::standings_rank);
        records
    }
}
