use chrono_tz::Tz;
use usage_charts::config::ChartConfig;

#[test]
fn test_defaults_are_valid() {
    let config = ChartConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.tick_spacing_px, 100.0);
    assert_eq!(config.min_span_secs, 60.0);
    assert_eq!(config.default_window_secs, 3600.0);
    assert_eq!(config.timezone, Tz::UTC);
    assert!(config.follow_common_range);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = ChartConfig::from_json_str(
        r#"{ "tick_spacing_px": 80.0, "timezone": "Europe/Paris", "follow_common_range": false }"#,
    )
    .unwrap();
    assert_eq!(config.tick_spacing_px, 80.0);
    assert_eq!(config.timezone, Tz::Europe__Paris);
    assert!(!config.follow_common_range);
    assert_eq!(config.nearest_scan_threshold, 64);

    assert_eq!(ChartConfig::from_json_str("{}").unwrap(), ChartConfig::default());
}

#[test]
fn test_unknown_timezone_is_rejected() {
    let err = ChartConfig::from_json_str(r#"{ "timezone": "Mars/Olympus" }"#).unwrap_err();
    assert!(err.to_string().contains("failed to parse chart configuration"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = ChartConfig::from_json_str(r#"{ "tick_spacing_px": 0.0 }"#).unwrap_err();
    assert!(err.to_string().contains("tick_spacing_px"));

    let config = ChartConfig {
        min_span_secs: 7200.0,
        ..ChartConfig::default()
    };
    assert!(config.validate().is_err());

    let config = ChartConfig {
        numeric_ticks: 1,
        ..ChartConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = ChartConfig {
        timezone: Tz::America__New_York,
        ..ChartConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(ChartConfig::from_json_str(&json).unwrap(), config);
}
