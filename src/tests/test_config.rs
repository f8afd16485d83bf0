// src/tests/test_config.rs

use crate::config::{DashboardConfig, MAX_BUFFER_CAPACITY, load_config_from_file, parse_config};
use crate::dashboard::Dashboard;
use crate::error::DashboardError;
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;

#[test]
fn test_defaults() {
    let config = DashboardConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.buffers.threat_capacity, 1000);
    assert_eq!(config.buffers.log_capacity, 1000);
    assert_eq!(config.buffers.default_limit, 50);
    assert_eq!(config.producers.threats.min_delay_ms, 1000);
    assert_eq!(config.producers.threats.max_delay_ms, 3000);
    assert_eq!(config.producers.logs.min_delay_ms, 500);
    assert_eq!(config.producers.logs.max_delay_ms, 2000);
    assert_eq!(config.refresh.interval_ms, 5000);
    assert!(config.collectors.feeds.is_empty());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(parse_config("").unwrap(), DashboardConfig::default());
    assert_eq!(parse_config("   \n").unwrap(), DashboardConfig::default());
}

#[test]
fn test_partial_document_keeps_other_defaults() {
    let yaml = r#"
server:
  bind_address: "0.0.0.0:8088"
buffers:
  threat_capacity: 250
producers:
  logs:
    min_delay_ms: 100
    max_delay_ms: 200
collectors:
  feeds:
    - name: "local-otx-export"
      path: "/var/lib/threatwatch/otx.json"
"#;
    let config = parse_config(yaml).unwrap();
    assert_eq!(
        config.server.bind_address,
        "0.0.0.0:8088".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(config.server.allowed_origins.len(), 2);
    assert_eq!(config.buffers.threat_capacity, 250);
    assert_eq!(config.buffers.log_capacity, 1000);
    assert!(config.producers.logs.enabled);
    assert_eq!(config.producers.logs.max_delay_ms, 200);
    assert_eq!(config.producers.threats.max_delay_ms, 3000);
    assert_eq!(config.collectors.feeds.len(), 1);
    assert!(config.collectors.feeds[0].enabled);
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        "buffers:\n  threat_capacity: 0\n",
        "buffers:\n  default_limit: 0\n",
        "producers:\n  threats:\n    min_delay_ms: 5000\n    max_delay_ms: 100\n",
        "producers:\n  severity_weights: {low: 0, medium: 0, high: 0, critical: 0}\n",
        "refresh:\n  interval_ms: 0\n",
        "collectors:\n  poll_interval_ms: 0\n",
        "producers:\n  threats:\n    min_delay_ms: 0\n    max_delay_ms: 0\n",
        "producers:\n  logs:\n    min_delay_ms: 0\n    max_delay_ms: 0\n",
        "buffers:\n  log_capacity: 18446744073709551615\n",
    ];
    for yaml in cases {
        match parse_config(yaml) {
            Err(DashboardError::ConfigError(_)) => {}
            other => panic!("Expected ConfigError for {:?}, got {:?}", yaml, other),
        }
    }
}

#[test]
fn test_capacity_and_delay_bounds() {
    let mut config = DashboardConfig::default();
    config.buffers.threat_capacity = MAX_BUFFER_CAPACITY;
    assert!(config.validate().is_ok());
    config.buffers.threat_capacity = MAX_BUFFER_CAPACITY + 1;
    assert!(matches!(
        config.validate(),
        Err(DashboardError::ConfigError(msg)) if msg.contains("threat_capacity")
    ));

    // zero delays only matter for a producer that actually runs
    let yaml = "producers:\n  threats:\n    enabled: false\n    min_delay_ms: 0\n    max_delay_ms: 0\n";
    assert!(parse_config(yaml).is_ok());
    let yaml = "producers:\n  threats:\n    min_delay_ms: 0\n    max_delay_ms: 5\n";
    assert!(parse_config(yaml).is_ok());
}

#[test]
fn test_malformed_yaml_is_config_error() {
    assert!(matches!(
        parse_config("buffers: [unclosed"),
        Err(DashboardError::ConfigError(_))
    ));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "refresh:\n  interval_ms: 2500").unwrap();

    let config = load_config_from_file(file.path()).unwrap();
    assert_eq!(config.refresh.interval_ms, 2500);

    let missing = load_config_from_file(Path::new("/nonexistent/threatwatch.yaml"));
    assert!(matches!(missing, Err(DashboardError::ConfigError(_))));
}

#[test]
fn test_yaml_round_trip_of_effective_config() {
    let config = DashboardConfig::default();
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("threat_capacity"));
    assert_eq!(parse_config(&yaml).unwrap(), config);
}

#[test]
fn test_dashboard_injects_configured_capacities() {
    let config = parse_config("buffers:\n  threat_capacity: 3\n  log_capacity: 7\n").unwrap();
    let dashboard = Dashboard::new(config).unwrap();
    assert_eq!(dashboard.threats().capacity(), 3);
    assert_eq!(dashboard.logs().capacity(), 7);
    assert!(dashboard.threats().is_empty());
}
