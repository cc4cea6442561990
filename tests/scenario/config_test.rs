//! Configuration loading scenarios.
//!
//! Exercises the TOML surface end to end: files on disk, partial files
//! falling back to defaults, malformed input, and save/reload.

use comwatch_common::{ConfigError, WatchConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[monitor]
timeout = "4s"
blink_interval = "200ms"
channel = 5

[link]
device = "/dev/ttyUSB1"
baud = 19200

[supervisor]
poll_period = "20ms"
status_every = 500
"#
    )
    .unwrap();

    let config = WatchConfig::from_file(file.path()).unwrap();
    assert_eq!(config.monitor.timeout, Duration::from_secs(4));
    assert_eq!(config.monitor.blink_interval, Duration::from_millis(200));
    assert_eq!(config.monitor.channel, 5);
    assert_eq!(config.link.baud, 19_200);
    assert_eq!(config.supervisor.status_every, 500);
    // Unset key keeps its default
    assert_eq!(config.link.heartbeat_char, 'T');
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_config_file() {
    let err =
        WatchConfig::from_file(std::path::Path::new("/nonexistent/comwatch.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    // A bare number is not a duration string.
    write!(file, "[monitor]\ntimeout = 10\n").unwrap();

    let err = WatchConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_saved_config_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch.toml");

    let mut config = WatchConfig::default();
    config.monitor.channel = 7;
    std::fs::write(&path, config.to_toml().unwrap()).unwrap();

    let reloaded = WatchConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.monitor.channel, 7);
    assert_eq!(reloaded.monitor.timeout, config.monitor.timeout);
}

#[test]
fn test_monitor_timing_flows_into_ticks() {
    let config =
        WatchConfig::from_toml("[monitor]\ntimeout = \"2s\"\nblink_interval = \"100ms\"\n")
            .unwrap();
    assert_eq!(config.monitor.timeout_ticks(), 2_000);
    assert_eq!(config.monitor.blink_interval_ticks(), 100);
}
