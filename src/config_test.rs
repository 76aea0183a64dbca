//! Tests for comparison configuration

use crate::config::CompareConfig;
use crate::dataset::Dimension;
use crate::error::AnalyticsError;

#[test]
fn test_default_config() {
    let config = CompareConfig::default();
    assert_eq!(config.time_windows, vec![7, 14, 28]);
    assert_eq!(config.segment_dims, Dimension::ALL.to_vec());
    assert_eq!(config.top_n, 15);
    assert!(config.validate().is_ok());
}

#[test]
fn test_deserialize_empty() {
    let config: CompareConfig = toml::from_str("").unwrap();
    assert_eq!(config, CompareConfig::default());
}

#[test]
fn test_deserialize_full() {
    let toml = r#"
time_windows = [7, 30]
segment_dims = ["platform", "country"]
top_n = 5
"#;
    let config: CompareConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.time_windows, vec![7, 30]);
    assert_eq!(
        config.segment_dims,
        vec![Dimension::Platform, Dimension::Country]
    );
    assert_eq!(config.top_n, 5);
}

#[test]
fn test_deserialize_dimension_aliases() {
    let toml = r#"segment_dims = ["campaign", "creative_type"]"#;
    let config: CompareConfig = toml::from_str(toml).unwrap();
    assert_eq!(
        config.segment_dims,
        vec![Dimension::Campaign, Dimension::CreativeType]
    );
}

#[test]
fn test_deserialize_unknown_dimension_fails() {
    let toml = r#"segment_dims = ["bogus"]"#;
    assert!(toml::from_str::<CompareConfig>(toml).is_err());
}

#[test]
fn test_validate_rejects_empty_windows() {
    let config = CompareConfig {
        time_windows: vec![],
        ..CompareConfig::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        AnalyticsError::InvalidConfig(_)
    ));
}

#[test]
fn test_validate_rejects_zero_window() {
    let config = CompareConfig {
        time_windows: vec![7, 0],
        ..CompareConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_top_n() {
    let config = CompareConfig {
        top_n: 0,
        ..CompareConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_default_window_is_smallest() {
    let config = CompareConfig::default();
    assert_eq!(config.default_window(), 7);

    let config = CompareConfig {
        time_windows: vec![28, 14],
        ..CompareConfig::default()
    };
    assert_eq!(config.default_window(), 14);
}

#[test]
fn test_clamp_window_passes_allowed_values() {
    let config = CompareConfig::default();
    assert_eq!(config.clamp_window(7), 7);
    assert_eq!(config.clamp_window(28), 28);
}

#[test]
fn test_clamp_window_snaps_to_closest() {
    let config = CompareConfig::default();
    assert_eq!(config.clamp_window(30), 28);
    assert_eq!(config.clamp_window(8), 7);
    assert_eq!(config.clamp_window(1), 7);
}

#[test]
fn test_clamp_window_ties_resolve_smaller() {
    let config = CompareConfig {
        time_windows: vec![10, 20],
        ..CompareConfig::default()
    };
    // 15 is equidistant from 10 and 20
    assert_eq!(config.clamp_window(15), 10);
}
