//! Unit tests for credentials loading.

use super::*;
use serial_test::serial;
use std::io::Write;

fn write_key_file(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("service_account.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
#[serial]
fn test_load_parses_project_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_key_file(
        &dir,
        r#"{"type":"service_account","project_id":"fantasy-football-test","client_email":"etl@fantasy-football-test.iam.gserviceaccount.com","private_key_id":"abc"}"#,
    );
    std::env::set_var(ACCESS_TOKEN_ENV_VAR, "ya29.test-token");

    let creds = GcpCredentials::load(&path).unwrap();
    assert_eq!(creds.key.project_id, "fantasy-football-test");
    assert_eq!(
        creds.key.client_email,
        "etl@fantasy-football-test.iam.gserviceaccount.com"
    );
    assert_eq!(creds.access_token, "ya29.test-token");

    std::env::remove_var(ACCESS_TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var(ACCESS_TOKEN_ENV_VAR, "ya29.test-token");

    let err = GcpCredentials::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, EtlError::Credentials { .. }));

    std::env::remove_var(ACCESS_TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn test_load_malformed_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_key_file(&dir, "not json at all");
    std::env::set_var(ACCESS_TOKEN_ENV_VAR, "ya29.test-token");

    let err = GcpCredentials::load(&path).unwrap_err();
    assert!(matches!(err, EtlError::Credentials { .. }));

    std::env::remove_var(ACCESS_TOKEN_ENV_VAR);
}

#[test]
#[serial]
fn test_load_requires_access_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_key_file(
        &dir,
        r#"{"project_id":"p","client_email":"e@p.iam.gserviceaccount.com"}"#,
    );
    std::env::remove_var(ACCESS_TOKEN_ENV_VAR);

    let err = GcpCredentials::load(&path).unwrap_err();
    assert!(matches!(err, EtlError::MissingConfig { .. }));
}
