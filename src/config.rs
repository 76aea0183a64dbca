//! Comparison configuration
//!
//! Allowed window lengths, the dimensions to fan out over, and the ranking
//! depth travel in an explicit config value passed by the caller. The engine
//! holds no global defaults.

use serde::Deserialize;

use crate::dataset::Dimension;
use crate::error::{AnalyticsError, Result};
use crate::segments::DEFAULT_TOP_N;

/// Comparison configuration
///
/// # Example
///
/// ```toml
/// time_windows = [7, 14, 28]
/// segment_dims = ["platform", "country"]
/// top_n = 10
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Allowed comparison window lengths, in days
    /// Default: [7, 14, 28]
    pub time_windows: Vec<u32>,

    /// Dimensions a multi-dimension run fans out over
    /// Default: all known dimensions
    pub segment_dims: Vec<Dimension>,

    /// How many gainers/losers to keep per dimension
    /// Default: 15
    pub top_n: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            time_windows: vec![7, 14, 28],
            segment_dims: Dimension::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl CompareConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.time_windows.is_empty() {
            return Err(AnalyticsError::InvalidConfig(
                "time_windows must not be empty".to_string(),
            ));
        }
        if self.time_windows.contains(&0) {
            return Err(AnalyticsError::InvalidConfig(
                "time_windows must be positive".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "top_n must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// The smallest allowed window; the default when a caller has no
    /// preference
    pub fn default_window(&self) -> u32 {
        self.time_windows.iter().copied().min().unwrap_or(7)
    }

    /// Snap a requested window length to the closest allowed one
    ///
    /// Ties resolve toward the smaller window.
    pub fn clamp_window(&self, requested: u32) -> u32 {
        if self.time_windows.contains(&requested) {
            return requested;
        }

        let mut allowed: Vec<u32> = self.time_windows.clone();
        allowed.sort_unstable();

        allowed
            .into_iter()
            .min_by_key(|w| requested.abs_diff(*w))
            .unwrap_or(requested)
    }
}
