//! Dataset rows and categorical dimensions
//!
//! The engine operates on a cleaned, in-memory row collection handed over by
//! the ingestion layer: numeric counters are already coerced to floats
//! (invalid parses become 0 upstream) and the date is either a valid calendar
//! day or explicitly missing. The engine never mutates rows; every entry
//! point takes `&[Row]` and returns freshly built result values.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AnalyticsError, Result};

/// One observation of advertising performance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    /// Calendar day of the observation; `None` when the source date was
    /// missing or unparseable. Undated rows never match any window.
    pub date: Option<NaiveDate>,
    /// Ad spend
    pub spend: f64,
    /// Ad impressions
    pub impressions: f64,
    /// Clicks
    pub clicks: f64,
    /// Purchases (conversions)
    pub purchases: f64,
    /// Attributed revenue
    pub revenue: f64,
    /// Campaign name
    pub campaign_name: Option<String>,
    /// Ad set name
    pub adset_name: Option<String>,
    /// Delivery platform (e.g., "facebook", "tiktok")
    pub platform: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Creative type (e.g., "video", "static")
    pub creative_type: Option<String>,
    /// Audience type (e.g., "prospecting", "retargeting")
    pub audience_type: Option<String>,
}

impl Row {
    /// Create a row observed on the given day
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Create a row whose source date was missing or unparseable
    pub fn undated() -> Self {
        Self::default()
    }

    /// Set spend
    pub fn with_spend(mut self, spend: f64) -> Self {
        self.spend = spend;
        self
    }

    /// Set impressions
    pub fn with_impressions(mut self, impressions: f64) -> Self {
        self.impressions = impressions;
        self
    }

    /// Set clicks
    pub fn with_clicks(mut self, clicks: f64) -> Self {
        self.clicks = clicks;
        self
    }

    /// Set purchases
    pub fn with_purchases(mut self, purchases: f64) -> Self {
        self.purchases = purchases;
        self
    }

    /// Set revenue
    pub fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = revenue;
        self
    }

    /// Set the campaign name
    pub fn with_campaign(mut self, name: impl Into<String>) -> Self {
        self.campaign_name = Some(name.into());
        self
    }

    /// Set the ad set name
    pub fn with_adset(mut self, name: impl Into<String>) -> Self {
        self.adset_name = Some(name.into());
        self
    }

    /// Set the platform
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Set the country
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the creative type
    pub fn with_creative_type(mut self, creative_type: impl Into<String>) -> Self {
        self.creative_type = Some(creative_type.into());
        self
    }

    /// Set the audience type
    pub fn with_audience_type(mut self, audience_type: impl Into<String>) -> Self {
        self.audience_type = Some(audience_type.into());
        self
    }
}

/// A categorical dimension rows can be segmented by
///
/// The fixed enum doubles as the field accessor: the dimension is resolved
/// from its name once per call, then `value()` reads rows without any
/// per-row string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// Campaign name
    Campaign,
    /// Ad set name
    Adset,
    /// Delivery platform
    Platform,
    /// Country
    Country,
    /// Creative type
    CreativeType,
    /// Audience type
    AudienceType,
}

impl Dimension {
    /// All known dimensions, in canonical order
    pub const ALL: [Dimension; 6] = [
        Self::Campaign,
        Self::Adset,
        Self::Platform,
        Self::Country,
        Self::CreativeType,
        Self::AudienceType,
    ];

    /// Parse a dimension from its column name
    ///
    /// Accepts the source column names (`campaign_name`, `adset_name`,
    /// `platform`, `country`, `creative_type`, `audience_type`) plus short
    /// aliases (`campaign`, `adset`, `creative`, `audience`).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "campaign_name" | "campaign" => Ok(Self::Campaign),
            "adset_name" | "adset" => Ok(Self::Adset),
            "platform" => Ok(Self::Platform),
            "country" => Ok(Self::Country),
            "creative_type" | "creative" => Ok(Self::CreativeType),
            "audience_type" | "audience" => Ok(Self::AudienceType),
            _ => Err(AnalyticsError::UnknownDimension(s.to_string())),
        }
    }

    /// Canonical column name of this dimension
    pub fn name(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign_name",
            Self::Adset => "adset_name",
            Self::Platform => "platform",
            Self::Country => "country",
            Self::CreativeType => "creative_type",
            Self::AudienceType => "audience_type",
        }
    }

    /// Read this dimension's value from a row; `None` means missing
    pub fn value<'a>(&self, row: &'a Row) -> Option<&'a str> {
        match self {
            Self::Campaign => row.campaign_name.as_deref(),
            Self::Adset => row.adset_name.as_deref(),
            Self::Platform => row.platform.as_deref(),
            Self::Country => row.country.as_deref(),
            Self::CreativeType => row.creative_type.as_deref(),
            Self::AudienceType => row.audience_type.as_deref(),
        }
    }
}

impl Serialize for Dimension {
    /// Serializes as the canonical column name
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    /// Deserializes from a column name or alias
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
