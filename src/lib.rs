//! Adpulse Analytics Engine
//!
//! Period-over-period comparison of advertising performance data.
//!
//! # Overview
//!
//! This crate is the numeric core of Adpulse: it takes a cleaned, in-memory
//! table of ad performance rows and compares the most recent window against
//! the one immediately before it. It includes:
//!
//! - **Periods**: adjacent, equal-length current/baseline window selection
//! - **Aggregation**: counter sums and derived rates with explicit
//!   zero-denominator semantics
//! - **Overview comparison**: per-metric deltas and percentage changes
//! - **Segment comparison**: per-dimension outer join, revenue-contribution
//!   shares, ranked top gainers and losers
//! - **Summary**: whole-dataset snapshot for planning layers
//!
//! # Usage
//!
//! ```ignore
//! use adpulse_analytics::{compare_overview, multi_segment_compare, CompareConfig};
//!
//! let config = CompareConfig::default();
//! let window = config.clamp_window(30); // snaps to the closest allowed window
//!
//! // Aggregate-level comparison
//! let overview = compare_overview(&rows, window)?;
//! println!("revenue delta: {:?}", overview.delta.revenue);
//!
//! // Fan out across dimensions; a bad dimension degrades to an error marker
//! let dims = ["platform", "country"];
//! let segments = multi_segment_compare(&rows, window, &dims, config.top_n)?;
//! ```
//!
//! # Undefined metrics
//!
//! A rate whose denominator is non-positive is [`MetricValue::Undefined`],
//! never zero: a window with no impressions has no CTR. Undefined propagates
//! through deltas and percentage changes, and serializes as JSON `null`.

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod overview;
pub mod period;
pub mod segments;
pub mod summary;
pub mod value;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod dataset_test;
#[cfg(test)]
mod overview_test;

// Re-exports for convenience
pub use aggregate::{aggregate, group_aggregate, AggregateMetrics};
pub use config::CompareConfig;
pub use dataset::{Dimension, Row};
pub use error::{AnalyticsError, Result};
pub use overview::{compare_overview, MetricDeltas, OverviewComparison};
pub use period::{rows_in_period, select_periods, Period};
pub use segments::{
    multi_segment_compare, segment_compare, DimensionOutcome, MetricChange,
    MultiSegmentComparison, SegmentComparison, SegmentRow, DEFAULT_TOP_N,
};
pub use summary::{summarize, DataSummary};
pub use value::MetricValue;
