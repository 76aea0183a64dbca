//! Whole-dataset summary
//!
//! A planner-facing snapshot of the dataset before any window is chosen:
//! date coverage, overall counter statistics, aggregate rates, the heaviest
//! segments per dimension and a few data-quality counts.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::{Dimension, Row};
use crate::value::MetricValue;

/// Date coverage of the dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    /// Earliest valid date
    pub min: NaiveDate,
    /// Latest valid date
    pub max: NaiveDate,
    /// Calendar days between min and max, inclusive
    pub days_covered: i64,
    /// Total row count, dated or not
    pub total_rows: usize,
}

/// Order statistics for one counter across all rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterStats {
    /// Sum over all rows
    pub total: f64,
    /// Mean per row
    pub mean: MetricValue,
    /// Median per row
    pub median: MetricValue,
    /// Smallest value
    pub min: MetricValue,
    /// Largest value
    pub max: MetricValue,
}

impl CounterStats {
    fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                total: 0.0,
                mean: MetricValue::Undefined,
                median: MetricValue::Undefined,
                min: MetricValue::Undefined,
                max: MetricValue::Undefined,
            };
        }

        let total: f64 = values.iter().sum();
        let mean = total / values.len() as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            total,
            mean: MetricValue::Defined(mean),
            median: MetricValue::Defined(median),
            min: MetricValue::Defined(sorted[0]),
            max: MetricValue::Defined(sorted[sorted.len() - 1]),
        }
    }
}

/// Dataset-wide counter statistics and aggregate rates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallMetrics {
    /// Spend statistics
    pub spend: CounterStats,
    /// Impression statistics
    pub impressions: CounterStats,
    /// Click statistics
    pub clicks: CounterStats,
    /// Purchase statistics
    pub purchases: CounterStats,
    /// Revenue statistics
    pub revenue: CounterStats,
    /// Revenue / spend across the whole dataset
    pub aggregate_roas: MetricValue,
    /// Clicks / impressions across the whole dataset
    pub aggregate_ctr: MetricValue,
    /// Purchases / clicks across the whole dataset
    pub aggregate_cvr: MetricValue,
    /// Spend / purchases across the whole dataset
    pub aggregate_cpa: MetricValue,
}

/// One segment's dataset-wide totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTotals {
    /// Segment value
    pub name: String,
    /// Total spend
    pub spend: f64,
    /// Total revenue
    pub revenue: f64,
    /// Revenue / spend for this segment
    pub roas: MetricValue,
    /// Percent of dataset-wide spend
    pub share_of_spend_pct: MetricValue,
    /// Percent of dataset-wide revenue
    pub share_of_revenue_pct: MetricValue,
}

/// Heaviest segments of one dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSegments {
    /// Top segments by total spend, descending
    pub top_by_spend: Vec<SegmentTotals>,
    /// Top segments by total revenue, descending
    pub top_by_revenue: Vec<SegmentTotals>,
}

/// Data-quality counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    /// Rows whose spend is exactly 0
    pub rows_with_zero_spend: usize,
    /// Rows without a valid date
    pub rows_with_missing_date: usize,
    /// Distinct campaign names
    pub unique_campaigns: usize,
    /// Distinct platforms
    pub unique_platforms: usize,
    /// Distinct countries
    pub unique_countries: usize,
}

/// Whole-dataset summary
#[derive(Debug, Clone, Serialize)]
pub struct DataSummary {
    /// Date coverage; `None` when no row has a valid date
    pub date_range: Option<DateRange>,
    /// Overall counter statistics and aggregate rates
    pub overall: OverallMetrics,
    /// Heaviest segments per dimension, keyed by canonical dimension name
    pub top_segments: BTreeMap<Dimension, TopSegments>,
    /// Data-quality counts
    pub data_quality: DataQuality,
}

/// Treat non-finite counters as 0, matching the aggregation policy
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Summarize a dataset, keeping `top_n` segments per ranking
pub fn summarize(rows: &[Row], top_n: usize) -> DataSummary {
    let date_range = date_range(rows);

    let collect = |f: fn(&Row) -> f64| -> Vec<f64> { rows.iter().map(|r| sanitize(f(r))).collect() };
    let spend = CounterStats::compute(&collect(|r| r.spend));
    let impressions = CounterStats::compute(&collect(|r| r.impressions));
    let clicks = CounterStats::compute(&collect(|r| r.clicks));
    let purchases = CounterStats::compute(&collect(|r| r.purchases));
    let revenue = CounterStats::compute(&collect(|r| r.revenue));

    let overall = OverallMetrics {
        aggregate_roas: MetricValue::ratio(revenue.total, spend.total),
        aggregate_ctr: MetricValue::ratio(clicks.total, impressions.total),
        aggregate_cvr: MetricValue::ratio(purchases.total, clicks.total),
        aggregate_cpa: MetricValue::ratio(spend.total, purchases.total),
        spend,
        impressions,
        clicks,
        purchases,
        revenue,
    };

    let mut top_segments = BTreeMap::new();
    for dimension in Dimension::ALL {
        if let Some(top) = top_segments_for(rows, dimension, top_n, &overall) {
            top_segments.insert(dimension, top);
        }
    }

    let data_quality = DataQuality {
        rows_with_zero_spend: rows.iter().filter(|r| sanitize(r.spend) == 0.0).count(),
        rows_with_missing_date: rows.iter().filter(|r| r.date.is_none()).count(),
        unique_campaigns: distinct_values(rows, Dimension::Campaign),
        unique_platforms: distinct_values(rows, Dimension::Platform),
        unique_countries: distinct_values(rows, Dimension::Country),
    };

    DataSummary {
        date_range,
        overall,
        top_segments,
        data_quality,
    }
}

fn date_range(rows: &[Row]) -> Option<DateRange> {
    let mut dates = rows.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

    Some(DateRange {
        min,
        max,
        days_covered: (max - min).num_days() + 1,
        total_rows: rows.len(),
    })
}

fn distinct_values(rows: &[Row], dimension: Dimension) -> usize {
    rows.iter()
        .filter_map(|r| dimension.value(r))
        .collect::<BTreeSet<_>>()
        .len()
}

/// Per-segment spend/revenue totals for one dimension
///
/// Rows missing the dimension are left out here; the summary ranks named
/// segments only, unlike the comparison join which keeps the missing group.
fn top_segments_for(
    rows: &[Row],
    dimension: Dimension,
    top_n: usize,
    overall: &OverallMetrics,
) -> Option<TopSegments> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for row in rows {
        if let Some(value) = dimension.value(row) {
            let entry = totals.entry(value).or_insert((0.0, 0.0));
            entry.0 += sanitize(row.spend);
            entry.1 += sanitize(row.revenue);
        }
    }

    if totals.is_empty() {
        return None;
    }

    let segments: Vec<SegmentTotals> = totals
        .into_iter()
        .map(|(name, (spend, revenue))| SegmentTotals {
            name: name.to_string(),
            spend,
            revenue,
            roas: MetricValue::ratio(revenue, spend),
            share_of_spend_pct: MetricValue::ratio(spend * 100.0, overall.spend.total),
            share_of_revenue_pct: MetricValue::ratio(revenue * 100.0, overall.revenue.total),
        })
        .collect();

    let mut top_by_spend = segments.clone();
    top_by_spend.sort_by(|a, b| b.spend.total_cmp(&a.spend));
    top_by_spend.truncate(top_n);

    let mut top_by_revenue = segments;
    top_by_revenue.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    top_by_revenue.truncate(top_n);

    Some(TopSegments {
        top_by_spend,
        top_by_revenue,
    })
}
