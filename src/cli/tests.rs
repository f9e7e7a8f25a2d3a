//! Unit tests for CLI argument parsing.

use super::*;

#[test]
fn test_parses_positional_base_path() {
    let args = EtlArgs::parse_from(["ffl-standings-etl", "/opt/airflow"]);
    assert_eq!(args.base_path, PathBuf::from("/opt/airflow"));
    assert!(!args.verbose);
}

#[test]
fn test_verbose_flag() {
    let args = EtlArgs::parse_from(["ffl-standings-etl", "-v", "/tmp/work"]);
    assert!(args.verbose);
}

#[test]
fn test_missing_base_path_is_an_error() {
    assert!(EtlArgs::try_parse_from(["ffl-standings-etl"]).is_err());
}
