use std::collections::HashMap;
use std::time::Duration;

use ppd_server::config::{LogFormat, ServerConfig, load_config};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_bundled_model() {
    let config = ServerConfig::default();
    assert_eq!(config.model_path.to_str(), Some("models/ppd_model.json"));
    assert_eq!(config.session_ttl(), Duration::from_secs(1800));
    assert_eq!(config.bind_addr.port(), 3030);
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn environment_overrides_file_values() {
    let mut config = ServerConfig::default();
    config
        .apply_overrides(lookup(&[
            ("PPD_BIND_ADDR", "0.0.0.0:8080"),
            ("PPD_MODEL_PATH", "/srv/model.json"),
            ("PPD_SESSION_TTL_SECS", "90"),
            ("PPD_LOG_FORMAT", "plain"),
        ]))
        .unwrap();

    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(config.model_path.to_str(), Some("/srv/model.json"));
    assert_eq!(config.session_ttl_secs, 90);
    assert_eq!(config.log_format, LogFormat::Plain);
}

#[test]
fn bad_overrides_are_errors() {
    let mut config = ServerConfig::default();
    assert!(config.apply_overrides(lookup(&[("PPD_BIND_ADDR", "nowhere")])).is_err());
    assert!(config.apply_overrides(lookup(&[("PPD_SESSION_TTL_SECS", "-5")])).is_err());
    assert!(config.apply_overrides(lookup(&[("PPD_LOG_FORMAT", "xml")])).is_err());
}

#[test]
fn current_version_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "bind_addr": "127.0.0.1:9000", "session_ttl_secs": 60 }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.bind_addr.port(), 9000);
    assert_eq!(config.session_ttl_secs, 60);
    assert_eq!(config.model_path.to_str(), Some("models/ppd_model.json"));
}

#[test]
fn unversioned_file_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "session_ttl_minutes": 15, "log_format": "plain" }"#).unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.session_ttl_secs, 900);
    assert_eq!(config.log_format, LogFormat::Plain);
}

#[test]
fn newer_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 7 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(&dir.path().join("absent.json")).is_err());
}

#[test]
fn oversized_version_is_rejected_not_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 4294967297 }"#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn oversized_minutes_fail_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        format!(r#"{{ "session_ttl_minutes": {} }}"#, u64::MAX),
    )
    .unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("too large"));
}
