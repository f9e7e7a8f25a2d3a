//! End-to-end pipeline test: real clients against mocked ESPN, Cloud
//! Storage, and BigQuery endpoints.

use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use ffl_standings_etl::{
    cli::types::LeagueId,
    config::EtlConfig,
    espn::EspnClient,
    gcp::{
        auth::{GcpCredentials, ServiceAccountKey},
        BigQueryClient, GcsClient,
    },
    pipeline, SeasonRange, ZeroGamesPolicy,
};

fn test_credentials() -> GcpCredentials {
    GcpCredentials {
        key: ServiceAccountKey {
            project_id: "fantasy-football-test".to_string(),
            client_email: "etl@fantasy-football-test.iam.gserviceaccount.com".to_string(),
        },
        access_token: "ya29.integration-token".to_string(),
    }
}

fn test_config(base_path: &std::path::Path) -> EtlConfig {
    EtlConfig {
        league_id: LeagueId::new(506169),
        espn_auth: None,
        league_nickname: "JKL".to_string(),
        bucket_name: "fantasy-fb-bucket".to_string(),
        table_id: "fantasy-football-test.jkl_records.jkl_standings_yearly".to_string(),
        credentials_path: base_path.join("service_account.json"),
        base_path: base_path.to_path_buf(),
        zero_games: ZeroGamesPolicy::Fail,
        notify: None,
    }
}

async fn mount_espn_season(server: &MockServer, year: u16, teams: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/leagueHistory/506169"))
        .and(query_param("seasonId", year.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "seasonId": year,
                "members": [
                    { "id": "{M1}", "firstName": "Mike", "lastName": "Moyer" }
                ],
                "teams": teams
            }
        ])))
        .mount(server)
        .await;
}

fn moyer_team(wins: u16, losses: u16, ties: u16, points_for: f64) -> serde_json::Value {
    json!({
        "id": 1,
        "location": "Team",
        "nickname": "Moyer",
        "owners": ["{M1}"],
        "playoffSeed": 1,
        "rankCalculatedFinal": 1,
        "record": {
            "overall": {
                "wins": wins,
                "losses": losses,
                "ties": ties,
                "pointsFor": points_for,
                "pointsAgainst": 1300.0
            }
        }
    })
}

#[tokio::test]
async fn test_extract_upload_load_end_to_end() {
    let espn = MockServer::start().await;
    let gcs = MockServer::start().await;
    let bigquery = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    // One team in 2008 (the reference scenario), an empty 2009.
    mount_espn_season(&espn, 2008, json!([moyer_team(10, 3, 1, 1500.0)])).await;
    mount_espn_season(&espn, 2009, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/fantasy-fb-bucket/o"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "JKL_historical.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "JKL_historical.csv"
        })))
        .expect(1)
        .mount(&gcs)
        .await;

    Mock::given(method("POST"))
        .and(path("/bigquery/v2/projects/fantasy-football-test/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobReference": { "jobId": "job_e2e" }
        })))
        .expect(1)
        .mount(&bigquery)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/bigquery/v2/projects/fantasy-football-test/jobs/job_e2e",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": { "state": "DONE" },
            "statistics": { "load": { "outputRows": "1" } }
        })))
        .mount(&bigquery)
        .await;

    let credentials = test_credentials();
    let source = EspnClient::new(config.league_id, None)
        .unwrap()
        .with_base_url(espn.uri());
    let store = GcsClient::new(&credentials).with_base_url(gcs.uri());
    let warehouse = BigQueryClient::new(&credentials).with_base_url(bigquery.uri());

    let report = pipeline::run(
        &source,
        &store,
        &warehouse,
        &config,
        SeasonRange::new(2008, 2009),
    )
    .await
    .unwrap();

    assert_eq!(report.rows_written, 1);
    assert_eq!(report.rows_loaded, 1);

    let contents = std::fs::read_to_string(config.output_file_path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "year,owner,team_name,wins,losses,ties,win_pct,pts_for,ppg,pts_against,playoff_finish,reg_season_finish"
    );
    // win_pct = (10 + 0.5) / 14 = 0.75, ppg = 1500 / 14.
    assert_eq!(
        lines[1],
        "2008,Mike Moyer,Team Moyer,10,3,1,0.75,1500.0,107.14285714285714,1300.0,1,1"
    );
}

#[tokio::test]
async fn test_bad_season_fails_whole_run() {
    let espn = MockServer::start().await;
    let gcs = MockServer::start().await;
    let bigquery = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    mount_espn_season(&espn, 2008, json!([moyer_team(10, 3, 1, 1500.0)])).await;
    // 2009 was never played: the provider has nothing for it.
    Mock::given(method("GET"))
        .and(path("/leagueHistory/506169"))
        .and(query_param("seasonId", "2009"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&espn)
        .await;

    // Neither cloud service may be touched.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gcs)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&bigquery)
        .await;

    let credentials = test_credentials();
    let source = EspnClient::new(config.league_id, None)
        .unwrap()
        .with_base_url(espn.uri());
    let store = GcsClient::new(&credentials).with_base_url(gcs.uri());
    let warehouse = BigQueryClient::new(&credentials).with_base_url(bigquery.uri());

    let err = pipeline::run(
        &source,
        &store,
        &warehouse,
        &config,
        SeasonRange::new(2008, 2009),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ffl_standings_etl::EtlError::NoSeasonData { season: 2009 }
    ));

    // The 2008 rows written before the failure are left behind as-is.
    let contents = std::fs::read_to_string(config.output_file_path()).unwrap();
    assert_eq!(contents.lines().count(), 2);
}
