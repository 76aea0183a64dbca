//! Metric aggregation
//!
//! Sums raw counters over a row set and derives rate metrics. Derived rates
//! follow one zero-denominator policy everywhere: a non-positive denominator
//! makes the rate [`MetricValue::Undefined`], never 0.
//!
//! | rate | formula                      | undefined when  |
//! |------|------------------------------|-----------------|
//! | ctr  | clicks / impressions         | impressions ≤ 0 |
//! | cpc  | spend / clicks               | clicks ≤ 0      |
//! | cpm  | spend / impressions × 1000   | impressions ≤ 0 |
//! | cvr  | purchases / clicks           | clicks ≤ 0      |
//! | roas | revenue / spend              | spend ≤ 0       |
//! | aov  | revenue / purchases          | purchases ≤ 0   |
//! | cpa  | spend / purchases            | purchases ≤ 0   |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{Dimension, Row};
use crate::value::MetricValue;

/// Summed counters plus derived rates for one row set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    /// Total spend
    pub spend: f64,
    /// Total impressions
    pub impressions: f64,
    /// Total clicks
    pub clicks: f64,
    /// Total purchases
    pub purchases: f64,
    /// Total revenue
    pub revenue: f64,
    /// Click-through rate
    pub ctr: MetricValue,
    /// Cost per click
    pub cpc: MetricValue,
    /// Cost per thousand impressions
    pub cpm: MetricValue,
    /// Conversion rate
    pub cvr: MetricValue,
    /// Return on ad spend
    pub roas: MetricValue,
    /// Average order value
    pub aov: MetricValue,
    /// Cost per acquisition
    pub cpa: MetricValue,
}

impl AggregateMetrics {
    /// Build an aggregate from already-summed counters, deriving the rates
    pub fn from_counters(
        spend: f64,
        impressions: f64,
        clicks: f64,
        purchases: f64,
        revenue: f64,
    ) -> Self {
        Self {
            spend,
            impressions,
            clicks,
            purchases,
            revenue,
            ctr: MetricValue::ratio(clicks, impressions),
            cpc: MetricValue::ratio(spend, clicks),
            cpm: MetricValue::ratio(spend * 1000.0, impressions),
            cvr: MetricValue::ratio(purchases, clicks),
            roas: MetricValue::ratio(revenue, spend),
            aov: MetricValue::ratio(revenue, purchases),
            cpa: MetricValue::ratio(spend, purchases),
        }
    }

    /// All-zero aggregate standing in for a segment absent from one window
    ///
    /// The rates are a literal defined 0 rather than undefined, so that a
    /// brand-new or discontinued segment still yields defined deltas and
    /// ranks by its full revenue swing.
    pub fn zero() -> Self {
        Self {
            spend: 0.0,
            impressions: 0.0,
            clicks: 0.0,
            purchases: 0.0,
            revenue: 0.0,
            ctr: MetricValue::Defined(0.0),
            cpc: MetricValue::Defined(0.0),
            cpm: MetricValue::Defined(0.0),
            cvr: MetricValue::Defined(0.0),
            roas: MetricValue::Defined(0.0),
            aov: MetricValue::Defined(0.0),
            cpa: MetricValue::Defined(0.0),
        }
    }
}

/// Treat non-finite counter values as 0 so they cannot poison a sum
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Aggregate a row set into summed counters and derived rates
///
/// An empty row set yields zero counters and all-undefined rates.
pub fn aggregate<'a>(rows: impl IntoIterator<Item = &'a Row>) -> AggregateMetrics {
    let mut spend = 0.0;
    let mut impressions = 0.0;
    let mut clicks = 0.0;
    let mut purchases = 0.0;
    let mut revenue = 0.0;

    for row in rows {
        spend += sanitize(row.spend);
        impressions += sanitize(row.impressions);
        clicks += sanitize(row.clicks);
        purchases += sanitize(row.purchases);
        revenue += sanitize(row.revenue);
    }

    AggregateMetrics::from_counters(spend, impressions, clicks, purchases, revenue)
}

/// Aggregate a row set grouped by one categorical dimension
///
/// Every distinct value of the dimension gets its own aggregate; rows with a
/// missing value form their own `None` group rather than being dropped. The
/// ordered map keys segments lexicographically with the missing group first,
/// which is also the tie-break order the ranking step inherits.
pub fn group_aggregate<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    dimension: Dimension,
) -> BTreeMap<Option<String>, AggregateMetrics> {
    let mut buckets: BTreeMap<Option<String>, Vec<&Row>> = BTreeMap::new();
    for row in rows {
        let key = dimension.value(row).map(str::to_string);
        buckets.entry(key).or_default().push(row);
    }

    buckets
        .into_iter()
        .map(|(key, group)| (key, aggregate(group)))
        .collect()
}
