//! Per-segment comparison and ranking
//!
//! Groups each comparison window by one categorical dimension, outer-joins
//! the two windows on segment value, computes per-segment deltas, percentage
//! changes and revenue-contribution shares, then ranks segments by revenue
//! delta to surface the top gainers and losers.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::aggregate::{group_aggregate, AggregateMetrics};
use crate::dataset::{Dimension, Row};
use crate::error::{AnalyticsError, Result};
use crate::period::{rows_in_period, select_periods, Period};
use crate::value::MetricValue;

/// Default number of gainers/losers to keep per dimension
pub const DEFAULT_TOP_N: usize = 15;

/// Current and baseline values of one metric, with delta and pct change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricChange {
    /// Current-window value
    pub current: MetricValue,
    /// Baseline-window value
    pub baseline: MetricValue,
    /// `current - baseline`
    pub delta: MetricValue,
    /// `(current - baseline) / baseline`
    pub pct_change: MetricValue,
}

impl MetricChange {
    /// Compute the change between two values of one metric
    pub fn between(current: MetricValue, baseline: MetricValue) -> Self {
        Self {
            current,
            baseline,
            delta: current - baseline,
            pct_change: current.pct_change_from(baseline),
        }
    }
}

/// One segment's comparison across the two windows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    /// Segment value; `None` is the group of rows missing the dimension
    pub segment: Option<String>,
    /// Revenue change
    pub revenue: MetricChange,
    /// Spend change
    pub spend: MetricChange,
    /// Impressions change
    pub impressions: MetricChange,
    /// Clicks change
    pub clicks: MetricChange,
    /// Purchases change
    pub purchases: MetricChange,
    /// Click-through rate change
    pub ctr: MetricChange,
    /// Conversion rate change
    pub cvr: MetricChange,
    /// Return on ad spend change
    pub roas: MetricChange,
    /// Cost per acquisition change
    pub cpa: MetricChange,
    /// Share of this dimension's total current-window revenue
    pub share_of_revenue_current: MetricValue,
    /// Share of this dimension's total baseline-window revenue
    pub share_of_revenue_baseline: MetricValue,
    /// Share of this dimension's total revenue delta
    pub share_of_revenue_change: MetricValue,
}

impl SegmentRow {
    fn from_aggregates(
        segment: Option<String>,
        current: &AggregateMetrics,
        baseline: &AggregateMetrics,
    ) -> Self {
        let counter = |cur: f64, base: f64| {
            MetricChange::between(MetricValue::from_f64(cur), MetricValue::from_f64(base))
        };

        Self {
            segment,
            revenue: counter(current.revenue, baseline.revenue),
            spend: counter(current.spend, baseline.spend),
            impressions: counter(current.impressions, baseline.impressions),
            clicks: counter(current.clicks, baseline.clicks),
            purchases: counter(current.purchases, baseline.purchases),
            ctr: MetricChange::between(current.ctr, baseline.ctr),
            cvr: MetricChange::between(current.cvr, baseline.cvr),
            roas: MetricChange::between(current.roas, baseline.roas),
            cpa: MetricChange::between(current.cpa, baseline.cpa),
            share_of_revenue_current: MetricValue::Undefined,
            share_of_revenue_baseline: MetricValue::Undefined,
            share_of_revenue_change: MetricValue::Undefined,
        }
    }

    /// Revenue delta as a plain float, for ranking
    ///
    /// Counters are always defined after the outer join, so the fallback is
    /// never observed in practice.
    pub fn revenue_delta(&self) -> f64 {
        self.revenue.delta.unwrap_or(0.0)
    }
}

/// Per-dimension comparison: ranked gainers and losers
#[derive(Debug, Clone, Serialize)]
pub struct SegmentComparison {
    /// The dimension segmented by (canonical column name)
    pub dimension: Dimension,
    /// Current period boundaries
    pub current_period: Period,
    /// Baseline period boundaries
    pub baseline_period: Period,
    /// Up to `top_n` segments, revenue delta descending
    pub top_gainers: Vec<SegmentRow>,
    /// Up to `top_n` segments, revenue delta ascending
    pub top_losers: Vec<SegmentRow>,
}

/// Compare segments of one dimension across the two windows
///
/// Outer-joins the grouped aggregates of both windows on segment value; a
/// segment present in only one window is paired with an all-zero aggregate
/// (see [`AggregateMetrics::zero`]). Segments with equal revenue delta rank
/// lexicographically by segment value, missing value first. A segment with
/// zero delta can appear in both lists when `top_n` reaches it from both
/// ends; that is intentional.
pub fn segment_compare(
    rows: &[Row],
    window_days: u32,
    dimension: Dimension,
    top_n: usize,
) -> Result<SegmentComparison> {
    let (current_period, baseline_period) = select_periods(rows, window_days)?;

    let current_groups = group_aggregate(rows_in_period(rows, &current_period), dimension);
    let baseline_groups = group_aggregate(rows_in_period(rows, &baseline_period), dimension);

    // Outer join over the union of segment keys. BTreeSet keeps the join
    // order lexicographic, which is the documented tie-break for ranking.
    let keys: BTreeSet<&Option<String>> =
        current_groups.keys().chain(baseline_groups.keys()).collect();

    let zero = AggregateMetrics::zero();
    let mut segments: Vec<SegmentRow> = keys
        .into_iter()
        .map(|key| {
            let current = current_groups.get(key).unwrap_or(&zero);
            let baseline = baseline_groups.get(key).unwrap_or(&zero);
            SegmentRow::from_aggregates(key.clone(), current, baseline)
        })
        .collect();

    // Contribution shares against the dimension-wide totals
    let total_current: f64 = segments
        .iter()
        .map(|s| s.revenue.current.unwrap_or(0.0))
        .sum();
    let total_baseline: f64 = segments
        .iter()
        .map(|s| s.revenue.baseline.unwrap_or(0.0))
        .sum();
    let total_delta: f64 = segments.iter().map(|s| s.revenue_delta()).sum();

    for segment in &mut segments {
        segment.share_of_revenue_current =
            MetricValue::ratio(segment.revenue.current.unwrap_or(0.0), total_current);
        segment.share_of_revenue_baseline =
            MetricValue::ratio(segment.revenue.baseline.unwrap_or(0.0), total_baseline);
        // The delta total may legitimately be negative; only an exact zero
        // leaves the share undefined.
        segment.share_of_revenue_change = if total_delta != 0.0 {
            MetricValue::Defined(segment.revenue_delta() / total_delta)
        } else {
            MetricValue::Undefined
        };
    }

    // Stable sorts preserve the lexicographic join order among equal deltas
    let mut gainers = segments.clone();
    gainers.sort_by(|a, b| b.revenue_delta().total_cmp(&a.revenue_delta()));
    gainers.truncate(top_n);

    let mut losers = segments;
    losers.sort_by(|a, b| a.revenue_delta().total_cmp(&b.revenue_delta()));
    losers.truncate(top_n);

    debug!(
        dimension = dimension.name(),
        gainers = gainers.len(),
        losers = losers.len(),
        "computed segment comparison"
    );

    Ok(SegmentComparison {
        dimension,
        current_period,
        baseline_period,
        top_gainers: gainers,
        top_losers: losers,
    })
}

/// Outcome of one dimension in a multi-dimension run
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DimensionOutcome {
    /// The dimension compared successfully
    Comparison(SegmentComparison),
    /// The dimension failed; siblings are unaffected
    Error {
        /// Failure message
        error: String,
    },
}

impl DimensionOutcome {
    /// The comparison, if this dimension succeeded
    pub fn comparison(&self) -> Option<&SegmentComparison> {
        match self {
            Self::Comparison(c) => Some(c),
            Self::Error { .. } => None,
        }
    }

    /// The error message, if this dimension failed
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Comparison(_) => None,
            Self::Error { error } => Some(error),
        }
    }
}

/// Ordered mapping from dimension name to its comparison or error marker
///
/// Serializes as a JSON object whose keys keep the caller's dimension order.
#[derive(Debug, Clone)]
pub struct MultiSegmentComparison {
    results: Vec<(String, DimensionOutcome)>,
}

impl MultiSegmentComparison {
    /// Look up one dimension's outcome by the name it was requested under
    pub fn get(&self, dimension: &str) -> Option<&DimensionOutcome> {
        self.results
            .iter()
            .find(|(name, _)| name == dimension)
            .map(|(_, outcome)| outcome)
    }

    /// Iterate outcomes in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DimensionOutcome)> {
        self.results
            .iter()
            .map(|(name, outcome)| (name.as_str(), outcome))
    }

    /// Number of requested dimensions
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check whether no dimensions were requested
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl Serialize for MultiSegmentComparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (name, outcome) in &self.results {
            map.serialize_entry(name, outcome)?;
        }
        map.end()
    }
}

/// Run the segment comparison across a list of dimension names
///
/// Each dimension is compared independently; an unknown name or a failing
/// comparison becomes an error marker in its slot while sibling dimensions
/// proceed. A dataset-level failure (no row with a valid date) aborts the
/// whole run instead, since no dimension could succeed. Dimensions are never
/// retried and the output preserves the input order.
pub fn multi_segment_compare<S: AsRef<str>>(
    rows: &[Row],
    window_days: u32,
    dimensions: &[S],
    top_n: usize,
) -> Result<MultiSegmentComparison> {
    let mut results = Vec::with_capacity(dimensions.len());

    for name in dimensions {
        let name = name.as_ref();
        let outcome = Dimension::parse(name)
            .and_then(|dimension| segment_compare(rows, window_days, dimension, top_n));

        let outcome = match outcome {
            Ok(comparison) => DimensionOutcome::Comparison(comparison),
            Err(err @ AnalyticsError::InvalidDataset(_)) => return Err(err),
            Err(err) => {
                warn!(dimension = name, error = %err, "segment comparison failed");
                DimensionOutcome::Error {
                    error: err.to_string(),
                }
            }
        };

        results.push((name.to_string(), outcome));
    }

    Ok(MultiSegmentComparison { results })
}
