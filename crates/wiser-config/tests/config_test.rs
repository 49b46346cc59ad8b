#![allow(clippy::unwrap_used)]
// Config file loading and translation to coordinator settings.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::{ExposeSecret, SecretString};

use wiser_config::{Config, ConfigError, load_config_from, save_config_to};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(cfg.scan_interval, 300);
    assert_eq!(cfg.boost_time, 30);
    assert_eq!(cfg.timeout, 5);
    assert_eq!(cfg.output, "table");
    assert!(cfg.secret.is_none());
}

#[test]
fn test_file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
host = "192.168.1.20"
secret = "from-file"
scan_interval = 60
minimum = -10.0
boost_temp = 22.5
"#,
    )
    .unwrap();

    let cfg = load_config_from(&path).unwrap();
    assert_eq!(cfg.host.as_deref(), Some("192.168.1.20"));
    assert_eq!(cfg.scan_interval, 60);
    assert_eq!(cfg.boost_temp, 22.5);
    assert_eq!(cfg.boost_time, 30);

    let settings = cfg
        .to_hub_settings(cfg.secret.clone().map(SecretString::from))
        .unwrap();
    assert_eq!(settings.host, "192.168.1.20");
    assert_eq!(settings.scan_interval, Duration::from_secs(60));
    assert_eq!(settings.minimum_temperature, -10.0);
    assert_eq!(settings.boost_temperature, 22.5);
    assert_eq!(settings.boost_minutes, 30);
    assert_eq!(settings.secret.unwrap().expose_secret(), "from-file");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "scan_interval = \"soon\"\n").unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");
}

#[test]
fn test_host_is_required() {
    let err = Config::default().to_hub_settings(None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingHost { .. }), "got {err:?}");

    let blank = Config {
        host: Some("  ".into()),
        ..Config::default()
    };
    assert!(blank.to_hub_settings(None).is_err());
}

#[test]
fn test_zero_timeout_is_rejected() {
    let cfg = Config {
        host: Some("hub.local".into()),
        timeout: 0,
        ..Config::default()
    };
    let err = cfg.to_hub_settings(None).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation { ref field, .. } if field == "timeout"),
        "got {err:?}"
    );
}

#[test]
fn test_saved_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let cfg = Config {
        host: Some("wiserheat.local".into()),
        away_temperature: 12.0,
        ..Config::default()
    };

    save_config_to(&cfg, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("host = \"wiserheat.local\""));

    assert_eq!(load_config_from(&path).unwrap(), cfg);
}
