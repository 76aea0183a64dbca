//! Tests for rows and dimension accessors

use chrono::NaiveDate;

use crate::dataset::{Dimension, Row};
use crate::error::AnalyticsError;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_row_builder() {
    let row = Row::on(d("2024-01-01"))
        .with_spend(10.0)
        .with_revenue(25.0)
        .with_campaign("Brand Push")
        .with_adset("Lookalike 1%")
        .with_platform("facebook")
        .with_country("US")
        .with_creative_type("video")
        .with_audience_type("prospecting");

    assert_eq!(row.date, Some(d("2024-01-01")));
    assert_eq!(row.spend, 10.0);
    assert_eq!(row.revenue, 25.0);
    assert_eq!(row.campaign_name.as_deref(), Some("Brand Push"));
    assert_eq!(row.audience_type.as_deref(), Some("prospecting"));
}

#[test]
fn test_undated_row() {
    let row = Row::undated();
    assert_eq!(row.date, None);
    assert_eq!(row.spend, 0.0);
}

#[test]
fn test_parse_canonical_names() {
    for dimension in Dimension::ALL {
        assert_eq!(Dimension::parse(dimension.name()).unwrap(), dimension);
    }
}

#[test]
fn test_parse_aliases_and_case() {
    assert_eq!(Dimension::parse("campaign").unwrap(), Dimension::Campaign);
    assert_eq!(Dimension::parse("adset").unwrap(), Dimension::Adset);
    assert_eq!(Dimension::parse("creative").unwrap(), Dimension::CreativeType);
    assert_eq!(Dimension::parse("audience").unwrap(), Dimension::AudienceType);
    assert_eq!(Dimension::parse(" Platform ").unwrap(), Dimension::Platform);
}

#[test]
fn test_parse_unknown_dimension() {
    let err = Dimension::parse("bogus_dimension").unwrap_err();
    assert!(matches!(err, AnalyticsError::UnknownDimension(_)));
    assert_eq!(err.to_string(), "unknown dimension: bogus_dimension");
}

#[test]
fn test_value_accessor() {
    let row = Row::undated()
        .with_platform("tiktok")
        .with_country("DE");

    assert_eq!(Dimension::Platform.value(&row), Some("tiktok"));
    assert_eq!(Dimension::Country.value(&row), Some("DE"));
    assert_eq!(Dimension::Campaign.value(&row), None);
}

#[test]
fn test_dimension_serializes_as_column_name() {
    let json = serde_json::to_string(&Dimension::CreativeType).unwrap();
    assert_eq!(json, "\"creative_type\"");
}
