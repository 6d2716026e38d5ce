//! Post-generation summary statistics. Informational only.

use crate::{
    error::GenResult,
    record::{OrderRecord, COLUMNS},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    /// (carrier, share of rows), largest share first.
    pub carrier_share: Vec<(String, f64)>,
    pub mean_delivery_days: f64,
    pub mean_delay_days: f64,
    pub on_time_rate: f64,
    pub mean_rating: f64,
}

impl DatasetSummary {
    pub fn from_rows(rows: &[OrderRecord]) -> Self {
        let n = rows.len();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for r in rows {
            *counts.entry(r.shipping_carrier.as_str()).or_insert(0) += 1;
        }
        let mut carrier_share: Vec<(String, f64)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count as f64 / n as f64))
            .collect();
        carrier_share.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            row_count: n,
            column_count: COLUMNS.len(),
            carrier_share,
            mean_delivery_days: mean(rows.iter().map(|r| r.actual_delivery_days as f64)),
            mean_delay_days: mean(rows.iter().map(|r| r.delivery_delay_days as f64)),
            on_time_rate: mean(rows.iter().map(|r| f64::from(r.delivery_met_promise))),
            mean_rating: mean(rows.iter().map(|r| f64::from(r.customer_delivery_rating))),
        }
    }

    pub fn to_json(&self) -> GenResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
