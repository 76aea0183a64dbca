//! Nullable metric values
//!
//! Rate metrics with a non-positive denominator are undefined, which is not
//! the same thing as zero: a campaign with no impressions has no CTR, while a
//! campaign whose ads were shown but never clicked has a CTR of 0. The two
//! must stay distinguishable all the way into serialized output.
//!
//! `MetricValue` replaces float-NaN sentinels with an explicit variant so the
//! propagation rules are spelled out instead of inherited from IEEE 754.
//! Unlike NaN, `Undefined == Undefined` holds, which keeps assertions and
//! join logic sane.

use std::ops::{Add, Sub};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A metric value that is either a defined number or undefined
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    /// A concrete value
    Defined(f64),
    /// Denominator was non-positive (or an operand was undefined)
    #[default]
    Undefined,
}

impl MetricValue {
    /// Compute `numerator / denominator`, undefined when the denominator
    /// is not strictly positive
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if denominator > 0.0 {
            Self::Defined(numerator / denominator)
        } else {
            Self::Undefined
        }
    }

    /// Wrap a value, mapping non-finite floats to undefined
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    /// Get the inner value, if defined
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    /// Get the inner value, or a fallback when undefined
    pub fn unwrap_or(&self, fallback: f64) -> f64 {
        self.as_f64().unwrap_or(fallback)
    }

    /// Check whether this value is defined
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Percentage change of `self` (current) relative to `baseline`:
    /// `(current - baseline) / baseline`
    ///
    /// Undefined when either operand is undefined or the baseline is exactly
    /// zero. Division by a zero baseline never yields infinity.
    pub fn pct_change_from(&self, baseline: MetricValue) -> Self {
        match (self, baseline) {
            (Self::Defined(cur), Self::Defined(base)) if base != 0.0 => {
                Self::Defined((cur - base) / base)
            }
            _ => Self::Undefined,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl Sub for MetricValue {
    type Output = MetricValue;

    /// Difference, undefined when either operand is undefined
    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Defined(a), Self::Defined(b)) => Self::Defined(a - b),
            _ => Self::Undefined,
        }
    }
}

impl Add for MetricValue {
    type Output = MetricValue;

    /// Sum, undefined when either operand is undefined
    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Defined(a), Self::Defined(b)) => Self::Defined(a + b),
            _ => Self::Undefined,
        }
    }
}

impl Serialize for MetricValue {
    /// Serializes as the number itself, or `null` when undefined
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Defined(v) => serializer.serialize_f64(*v),
            Self::Undefined => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    /// Deserializes from a nullable number; `null` and non-finite values
    /// become undefined
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(match value {
            Some(v) => Self::from_f64(v),
            None => Self::Undefined,
        })
    }
}
