//! Unit tests for the Cloud Storage uploader (mocked HTTP).

use super::*;
use crate::gcp::auth::{GcpCredentials, ServiceAccountKey};
use std::io::Write;
use wiremock::{
    matchers::{body_bytes, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn test_credentials() -> GcpCredentials {
    GcpCredentials {
        key: ServiceAccountKey {
            project_id: "fantasy-football-test".to_string(),
            client_email: "etl@fantasy-football-test.iam.gserviceaccount.com".to_string(),
        },
        access_token: "ya29.test-token".to_string(),
    }
}

fn write_local_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("JKL_historical.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn test_upload_sends_whole_file() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let csv = "year,owner\n2008,Mike Moyer\n";
    let local_path = write_local_csv(&dir, csv);

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/fantasy-fb-bucket/o"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "JKL_historical.csv"))
        .and(header("authorization", "Bearer ya29.test-token"))
        .and(header("content-type", "text/csv"))
        .and(body_bytes(csv.as_bytes().to_vec()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "JKL_historical.csv", "bucket": "fantasy-fb-bucket"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GcsClient::new(&test_credentials()).with_base_url(mock_server.uri());
    client
        .upload("fantasy-fb-bucket", &local_path, "JKL_historical.csv")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_upload_auth_failure_propagates() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let local_path = write_local_csv(&dir, "header\n");

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = GcsClient::new(&test_credentials()).with_base_url(mock_server.uri());
    let err = client
        .upload("fantasy-fb-bucket", &local_path, "JKL_historical.csv")
        .await
        .unwrap_err();
    assert!(matches!(err, crate::EtlError::Http(_)));
}

#[tokio::test]
async fn test_upload_missing_local_file() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let client = GcsClient::new(&test_credentials()).with_base_url(mock_server.uri());
    let err = client
        .upload(
            "fantasy-fb-bucket",
            &dir.path().join("nope.csv"),
            "JKL_historical.csv",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, crate::EtlError::Io(_)));
}
