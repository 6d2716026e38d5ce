//! The order record: one simulated transaction, one CSV row.

use crate::{
    reference::ReferenceTables,
    types::{ChannelType, DeliveryIssue, DistanceTier, ShippingTier, TransactionStatus},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// CSV header, in serialization order.
pub const COLUMNS: [&str; 39] = [
    "order_id",
    "customer_id",
    "order_date",
    "shipped_date",
    "delivered_date",
    "processing_days",
    "delivery_days",
    "promised_delivery_days",
    "actual_delivery_days",
    "delivery_delay_days",
    "delivery_met_promise",
    "product_category",
    "product_price_mxn",
    "product_weight_kg",
    "quantity",
    "total_amount_mxn",
    "shipping_carrier",
    "shipping_tier",
    "shipping_cost_mxn",
    "distance_km",
    "shipping_type",
    "customer_state",
    "customer_region",
    "customer_age_group",
    "customer_loyalty_months",
    "purchase_frequency",
    "is_urban",
    "payment_method",
    "transaction_status",
    "payment_installments",
    "sales_channel",
    "platform_name",
    "is_peak_season",
    "customer_delivery_rating",
    "delivery_issue",
    "shipping_cost_to_price_ratio",
    "is_frequent_customer",
    "is_loyal_customer",
    "high_value_order",
];

/// Field order here is the column order on disk. Keep it in step with
/// `COLUMNS`.
///
/// The four `Option` fields are only ever `None` after the error
/// injector has nulled them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,

    #[serde(with = "crate::calendar::timestamp")]
    pub order_date: NaiveDateTime,
    #[serde(with = "crate::calendar::timestamp")]
    pub shipped_date: NaiveDateTime,
    #[serde(with = "crate::calendar::timestamp")]
    pub delivered_date: NaiveDateTime,

    pub processing_days: u32,
    pub delivery_days: i64,
    pub promised_delivery_days: i64,
    pub actual_delivery_days: i64,
    pub delivery_delay_days: i64,
    pub delivery_met_promise: u8,

    pub product_category: String,
    pub product_price_mxn: Option<f64>,
    pub product_weight_kg: f64,
    pub quantity: u32,
    pub total_amount_mxn: f64,

    pub shipping_carrier: String,
    pub shipping_tier: ShippingTier,
    pub shipping_cost_mxn: Option<f64>,
    pub distance_km: Option<u32>,
    pub shipping_type: DistanceTier,

    pub customer_state: String,
    pub customer_region: String,
    pub customer_age_group: String,
    pub customer_loyalty_months: Option<u32>,
    pub purchase_frequency: u32,
    pub is_urban: u8,

    pub payment_method: String,
    pub transaction_status: TransactionStatus,
    pub payment_installments: u32,

    pub sales_channel: ChannelType,
    pub platform_name: String,

    pub is_peak_season: u8,

    pub customer_delivery_rating: u8,
    pub delivery_issue: DeliveryIssue,

    pub shipping_cost_to_price_ratio: f64,
    pub is_frequent_customer: u8,
    pub is_loyal_customer: u8,
    pub high_value_order: u8,
}

impl OrderRecord {
    /// Names of the derived-field invariants this record breaks.
    /// Empty for every row the error injector did not touch.
    pub fn invariant_violations(&self, tables: &ReferenceTables) -> Vec<&'static str> {
        let mut broken = Vec::new();
        if self.order_date > self.shipped_date {
            broken.push("order_date <= shipped_date");
        }
        if self.shipped_date > self.delivered_date {
            broken.push("shipped_date <= delivered_date");
        }
        if self.delivery_delay_days != self.actual_delivery_days - self.promised_delivery_days {
            broken.push("delay = actual - promised");
        }
        if (self.delivery_met_promise == 1) != (self.delivery_delay_days <= 0) {
            broken.push("met_promise iff delay <= 0");
        }
        if tables.region_of(&self.customer_state) != Some(self.customer_region.as_str()) {
            broken.push("region contains state");
        }
        if !(1..=5).contains(&self.customer_delivery_rating) {
            broken.push("rating in [1, 5]");
        }
        if self.quantity < 1 {
            broken.push("quantity >= 1");
        }
        broken
    }
}

pub(crate) fn flag(value: bool) -> u8 {
    u8::from(value)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
