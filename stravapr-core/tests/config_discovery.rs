//! Config file discovery and precedence.

use std::fs;
use stravapr_core::config::{Config, ConfigError};
use stravapr_core::strava::DEFAULT_BASE_URL;

#[test]
fn first_existing_file_wins() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("missing.toml");
    let second = dir.path().join("strava-pr.toml");
    let third = dir.path().join("other.toml");
    fs::write(&second, "[strava]\naccess_token = \"from-second\"\n").unwrap();
    fs::write(&third, "[strava]\naccess_token = \"from-third\"\n").unwrap();

    let cfg = Config::load_from(&[first, second.clone(), third], None).unwrap();
    assert_eq!(cfg.access_token, "from-second");
    assert_eq!(cfg.source.as_deref(), Some(second.as_path()));
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
}

#[test]
fn env_token_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strava-pr.toml");
    fs::write(
        &path,
        "[strava]\nclient_id = \"42\"\naccess_token = \"file\"\nlog_level = \"info\"\n",
    )
    .unwrap();

    let cfg = Config::load_from(&[path], Some("env".into())).unwrap();
    assert_eq!(cfg.access_token, "env");
    assert_eq!(cfg.client_id.as_deref(), Some("42"));
    assert_eq!(cfg.log_level.as_deref(), Some("info"));
}

#[test]
fn file_without_token_is_missing_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strava-pr.toml");
    fs::write(&path, "[strava]\nclient_id = \"42\"\n").unwrap();

    let err = Config::load_from(&[path], None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingAccessToken { .. }));
}

#[test]
fn broken_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strava-pr.toml");
    fs::write(&path, "[strava\n").unwrap();

    let err = Config::load_from(&[path.clone()], Some("env".into())).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}
