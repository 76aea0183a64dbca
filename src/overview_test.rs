//! Tests for the aggregate-level comparison

use chrono::NaiveDate;

use crate::dataset::Row;
use crate::error::AnalyticsError;
use crate::overview::compare_overview;
use crate::value::MetricValue;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn row(date: &str, spend: f64, impressions: f64, clicks: f64, revenue: f64) -> Row {
    Row::on(d(date))
        .with_spend(spend)
        .with_impressions(impressions)
        .with_clicks(clicks)
        .with_revenue(revenue)
}

/// Two days of current window vs two days of baseline window
fn two_day_dataset() -> Vec<Row> {
    vec![
        // baseline: 2024-01-08..09
        row("2024-01-08", 50.0, 100.0, 5.0, 100.0),
        row("2024-01-09", 50.0, 100.0, 5.0, 100.0),
        // current: 2024-01-10..11
        row("2024-01-10", 50.0, 100.0, 5.0, 150.0),
        row("2024-01-11", 50.0, 100.0, 5.0, 150.0),
    ]
}

#[test]
fn test_roas_comparison_end_to_end() {
    let overview = compare_overview(&two_day_dataset(), 2).unwrap();

    assert_eq!(overview.window_days, 2);
    assert_eq!(overview.current_period.start, d("2024-01-10"));
    assert_eq!(overview.current_period.end, d("2024-01-11"));
    assert_eq!(overview.baseline_period.start, d("2024-01-08"));
    assert_eq!(overview.baseline_period.end, d("2024-01-09"));

    assert_eq!(overview.current.roas, MetricValue::Defined(3.0));
    assert_eq!(overview.baseline.roas, MetricValue::Defined(2.0));
    assert_eq!(overview.delta.roas, MetricValue::Defined(1.0));
    assert_eq!(overview.pct_change.roas, MetricValue::Defined(0.5));
}

#[test]
fn test_counter_deltas_and_pct_change() {
    let overview = compare_overview(&two_day_dataset(), 2).unwrap();

    assert_eq!(overview.delta.revenue, MetricValue::Defined(100.0));
    assert_eq!(overview.pct_change.revenue, MetricValue::Defined(0.5));
    assert_eq!(overview.delta.spend, MetricValue::Defined(0.0));
    assert_eq!(overview.pct_change.spend, MetricValue::Defined(0.0));
}

#[test]
fn test_zero_spend_baseline_makes_roas_comparison_undefined() {
    let rows = vec![
        // baseline has revenue but no spend
        row("2024-01-09", 0.0, 100.0, 5.0, 100.0),
        // current has a perfectly good roas
        row("2024-01-10", 50.0, 100.0, 5.0, 150.0),
    ];

    let overview = compare_overview(&rows, 1).unwrap();
    assert_eq!(overview.current.roas, MetricValue::Defined(3.0));
    assert_eq!(overview.baseline.roas, MetricValue::Undefined);
    assert_eq!(overview.delta.roas, MetricValue::Undefined);
    assert_eq!(overview.pct_change.roas, MetricValue::Undefined);
}

#[test]
fn test_zero_counter_baseline_pct_change_undefined() {
    let rows = vec![
        // baseline window is empty: all counters 0
        row("2024-01-10", 50.0, 100.0, 5.0, 150.0),
        row("2024-01-11", 50.0, 100.0, 5.0, 150.0),
    ];

    let overview = compare_overview(&rows, 2).unwrap();
    assert_eq!(overview.baseline.revenue, 0.0);
    // delta is defined (counters are never undefined)...
    assert_eq!(overview.delta.revenue, MetricValue::Defined(300.0));
    // ...but a zero baseline never yields an infinite pct change
    assert_eq!(overview.pct_change.revenue, MetricValue::Undefined);
}

#[test]
fn test_rows_outside_both_windows_are_ignored() {
    let mut rows = two_day_dataset();
    rows.push(row("2023-06-01", 9999.0, 9.0, 9.0, 9999.0));
    rows.push(Row::undated().with_spend(12345.0));

    let overview = compare_overview(&rows, 2).unwrap();
    assert_eq!(overview.current.spend, 100.0);
    assert_eq!(overview.baseline.spend, 100.0);
}

#[test]
fn test_undated_dataset_fails() {
    let rows = vec![Row::undated().with_spend(10.0)];
    let err = compare_overview(&rows, 7).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidDataset(_)));
}

#[test]
fn test_serialized_shape() {
    let overview = compare_overview(&two_day_dataset(), 2).unwrap();
    let json = serde_json::to_value(&overview).unwrap();

    assert_eq!(json["window_days"], 2);
    assert_eq!(json["current_period"]["start"], "2024-01-10");
    assert_eq!(json["baseline_period"]["end"], "2024-01-09");
    assert_eq!(json["current"]["roas"], 3.0);
    assert_eq!(json["delta"]["roas"], 1.0);
    assert_eq!(json["pct_change"]["roas"], 0.5);
    // purchases were never set, so aov has a zero denominator
    assert!(json["current"]["aov"].is_null());
}
