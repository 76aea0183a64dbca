//! Comparison period selection and range filtering
//!
//! A period is a closed calendar-day window. The current period ends at the
//! dataset's latest valid date; the baseline period is the equally long
//! window immediately before it, adjacent with no gap and no overlap.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::Row;
use crate::error::{AnalyticsError, Result};

/// A closed calendar-day interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl Period {
    /// Number of calendar days covered, both endpoints included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check whether a day falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Select the current and baseline comparison periods
///
/// The current period is the `window_days`-day window ending at the dataset's
/// maximum valid date; the baseline period is the `window_days`-day window
/// ending the day before the current period starts:
///
/// ```text
/// [baseline.start .. baseline.end][current.start .. current.end == max date]
/// ```
///
/// Returns `(current, baseline)`. Fails with `InvalidDataset` when no row
/// carries a valid date. `window_days` is not validated here; callers
/// constrain it to an allow-list via [`CompareConfig`](crate::CompareConfig).
pub fn select_periods(rows: &[Row], window_days: u32) -> Result<(Period, Period)> {
    let max_date = rows.iter().filter_map(|r| r.date).max().ok_or_else(|| {
        AnalyticsError::InvalidDataset("all dates are missing; cannot select periods".to_string())
    })?;

    let span = Days::new(u64::from(window_days.saturating_sub(1)));
    let current_end = max_date;
    let current_start = current_end - span;
    let baseline_end = current_start - Days::new(1);
    let baseline_start = baseline_end - span;

    let current = Period {
        start: current_start,
        end: current_end,
    };
    let baseline = Period {
        start: baseline_start,
        end: baseline_end,
    };

    debug!(
        window_days,
        current_start = %current.start,
        current_end = %current.end,
        baseline_start = %baseline.start,
        baseline_end = %baseline.end,
        "selected comparison periods"
    );

    Ok((current, baseline))
}

/// Iterate over the rows whose date falls inside a closed period
///
/// Rows with a missing date never match. Borrows rows in place; nothing is
/// copied or mutated.
pub fn rows_in_period<'a>(
    rows: &'a [Row],
    period: &'a Period,
) -> impl Iterator<Item = &'a Row> + 'a {
    rows.iter()
        .filter(move |row| row.date.is_some_and(|d| period.contains(d)))
}
