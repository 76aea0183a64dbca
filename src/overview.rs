//! Aggregate-level period-over-period comparison
//!
//! Aggregates the current and baseline windows without grouping, then lines
//! the two up metric-by-metric: `delta = current - baseline` and
//! `pct_change = (current - baseline) / baseline`, both with explicit
//! undefined propagation (see [`MetricValue`]).

use serde::Serialize;
use tracing::debug;

use crate::aggregate::{aggregate, AggregateMetrics};
use crate::dataset::Row;
use crate::error::Result;
use crate::period::{rows_in_period, select_periods, Period};
use crate::value::MetricValue;

/// One value per metric: the five counters plus the seven derived rates
///
/// Used for the delta and pct_change blocks of an overview comparison.
/// Counter entries are always defined; rate entries inherit undefinedness
/// from their operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDeltas {
    /// Spend
    pub spend: MetricValue,
    /// Impressions
    pub impressions: MetricValue,
    /// Clicks
    pub clicks: MetricValue,
    /// Purchases
    pub purchases: MetricValue,
    /// Revenue
    pub revenue: MetricValue,
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

impl MetricDeltas {
    /// Per-metric difference `current - baseline`
    pub fn delta(current: &AggregateMetrics, baseline: &AggregateMetrics) -> Self {
        Self {
            spend: MetricValue::from_f64(current.spend) - MetricValue::from_f64(baseline.spend),
            impressions: MetricValue::from_f64(current.impressions)
                - MetricValue::from_f64(baseline.impressions),
            clicks: MetricValue::from_f64(current.clicks) - MetricValue::from_f64(baseline.clicks),
            purchases: MetricValue::from_f64(current.purchases)
                - MetricValue::from_f64(baseline.purchases),
            revenue: MetricValue::from_f64(current.revenue)
                - MetricValue::from_f64(baseline.revenue),
            ctr: current.ctr - baseline.ctr,
            cpc: current.cpc - baseline.cpc,
            cpm: current.cpm - baseline.cpm,
            cvr: current.cvr - baseline.cvr,
            roas: current.roas - baseline.roas,
            aov: current.aov - baseline.aov,
            cpa: current.cpa - baseline.cpa,
        }
    }

    /// Per-metric percentage change relative to the baseline
    pub fn pct_change(current: &AggregateMetrics, baseline: &AggregateMetrics) -> Self {
        Self {
            spend: MetricValue::from_f64(current.spend)
                .pct_change_from(MetricValue::from_f64(baseline.spend)),
            impressions: MetricValue::from_f64(current.impressions)
                .pct_change_from(MetricValue::from_f64(baseline.impressions)),
            clicks: MetricValue::from_f64(current.clicks)
                .pct_change_from(MetricValue::from_f64(baseline.clicks)),
            purchases: MetricValue::from_f64(current.purchases)
                .pct_change_from(MetricValue::from_f64(baseline.purchases)),
            revenue: MetricValue::from_f64(current.revenue)
                .pct_change_from(MetricValue::from_f64(baseline.revenue)),
            ctr: current.ctr.pct_change_from(baseline.ctr),
            cpc: current.cpc.pct_change_from(baseline.cpc),
            cpm: current.cpm.pct_change_from(baseline.cpm),
            cvr: current.cvr.pct_change_from(baseline.cvr),
            roas: current.roas.pct_change_from(baseline.roas),
            aov: current.aov.pct_change_from(baseline.aov),
            cpa: current.cpa.pct_change_from(baseline.cpa),
        }
    }
}

/// Aggregate-level comparison of the current window against the baseline
#[derive(Debug, Clone, Serialize)]
pub struct OverviewComparison {
    /// Window length in days
    pub window_days: u32,
    /// Current period boundaries
    pub current_period: Period,
    /// Baseline period boundaries
    pub baseline_period: Period,
    /// Current-window aggregate
    pub current: AggregateMetrics,
    /// Baseline-window aggregate
    pub baseline: AggregateMetrics,
    /// Per-metric difference
    pub delta: MetricDeltas,
    /// Per-metric percentage change
    pub pct_change: MetricDeltas,
}

/// Compare the most recent `window_days` against the preceding window
///
/// Fails with `InvalidDataset` when no row carries a valid date.
pub fn compare_overview(rows: &[Row], window_days: u32) -> Result<OverviewComparison> {
    let (current_period, baseline_period) = select_periods(rows, window_days)?;

    let current = aggregate(rows_in_period(rows, &current_period));
    let baseline = aggregate(rows_in_period(rows, &baseline_period));

    let delta = MetricDeltas::delta(&current, &baseline);
    let pct_change = MetricDeltas::pct_change(&current, &baseline);

    debug!(
        window_days,
        current_revenue = current.revenue,
        baseline_revenue = baseline.revenue,
        "computed overview comparison"
    );

    Ok(OverviewComparison {
        window_days,
        current_period,
        baseline_period,
        current,
        baseline,
        delta,
        pct_change,
    })
}
