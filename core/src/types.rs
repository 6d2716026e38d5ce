//! Shared primitive types and closed vocabularies used across the generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based position of a record in generation order.
pub type RowIndex = usize;

/// How far a parcel travels relative to the fulfilment origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceTier {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "regional")]
    Regional,
    #[serde(rename = "national")]
    National,
}

impl DistanceTier {
    pub const ALL: [DistanceTier; 3] = [Self::Local, Self::Regional, Self::National];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Local    => "local",
            Self::Regional => "regional",
            Self::National => "national",
        }
    }

    /// Shipping cost multiplier for this tier.
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Local    => 1.0,
            Self::Regional => 1.5,
            Self::National => 2.0,
        }
    }

    /// Half-open km range a distance is drawn from.
    pub fn km_range(&self) -> (u32, u32) {
        match self {
            Self::Local    => (0, 50),
            Self::Regional => (50, 300),
            Self::National => (300, 1500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingTier {
    Standard,
    Express,
}

impl ShippingTier {
    pub fn is_express(&self) -> bool {
        matches!(self, Self::Express)
    }

    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Express  => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Authorized,
    #[serde(rename = "Under review")]
    UnderReview,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryIssue {
    None,
    Delay,
    Damaged,
    Lost,
    Misdelivered,
}

impl DeliveryIssue {
    pub const ALL: [DeliveryIssue; 5] = [
        Self::None,
        Self::Delay,
        Self::Damaged,
        Self::Lost,
        Self::Misdelivered,
    ];
}

/// Whether the order came through a third-party marketplace or the
/// merchant's own storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelType {
    Marketplace,
    Direct,
}

impl fmt::Display for DistanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
