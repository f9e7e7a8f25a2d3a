use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE},
    Client,
};

use crate::cli::types::{LeagueId, Season};
use crate::config::EspnAuth;
use crate::error::{EtlError, Result};
use crate::espn::types::{LeagueSeason, TeamSeason};


/// Base path for ESPN Fantasy Football v3 API.
pub const FFL_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

/// Thin client over the ESPN `leagueHistory` endpoint.
///
/// Holds the league id and the session cookie headers so a run can fetch
/// many seasons with one configured client. Session cookies (`espn_s2` +
/// `SWID`) are required for private leagues and can expire server-side;
/// an expired session surfaces as a plain HTTP error, nothing is retried.
pub struct EspnClient {
    client: Client,
    headers: HeaderMap,
    league_id: LeagueId,
    base_url: String,
}

/// Build cookie headers from league auth, if configured.
///
/// Returns `Ok(None)` when no auth is supplied (public leagues).
pub fn maybe_cookie_header_map(auth: Option<&EspnAuth>) -> Result<Option<HeaderMap>> {
    if let Some(auth) = auth {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let cookie = format!("SWID={}; espn_s2={}", auth.swid, auth.espn_s2);
        h.insert(COOKIE, HeaderValue::from_str(&cookie)?);
        Ok(Some(h))
    } else {
        Ok(None)
    }
}

impl EspnClient {
    pub fn new(league_id: LeagueId, auth: Option<&EspnAuth>) -> Result<Self> {
        let headers = maybe_cookie_header_map(auth)?.unwrap_or_else(|| {
            let mut h = HeaderMap::new();
            h.insert(ACCEPT, HeaderValue::from_static("application/json"));
            h
        });
        Ok(Self {
            client: Client::new(),
            headers,
            league_id,
            base_url: FFL_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch final standings for one historical season.
    ///
    /// Returns one record per team, ordered by final standing. A season the
    /// provider has no data for is an error; a season with zero teams is an
    /// empty vector.
    pub async fn fetch_season(&self, season: Season) -> Result<Vec<TeamSeason>> {
        let url = format!("{}/leagueHistory/{}", self.base_url, self.league_id);
        let params = [
            ("seasonId", season.to_string()),
            ("view", "mTeam".to_string()),
            ("view", "mStandings".to_string()),
        ];

        let leagues = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<LeagueSeason>>()
            .await?;

        let league = leagues.into_iter().next().ok_or(EtlError::NoSeasonData {
            season: season.as_u16(),
        })?;

        Ok(league.standings())
    }
}

impl crate::pipeline::StandingsSource for EspnClient {
    async fn fetch_season(&self, season: Season) -> Result<Vec<TeamSeason>> {
        EspnClient::fetch_season(self, season).await
    }
}
