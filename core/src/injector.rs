//! ErrorInjector: deliberate data-quality defects on a sampled subset of rows.
//!
//! RULE: this is the only code allowed to break record invariants, and it
//! only touches the rows it selected. Row count and columns never change.
//!
//! Each selected row first has its defect fully resolved (kind, sub-choice
//! and any drawn values) into a `Defect`, which is then applied by an
//! exhaustive match. The resolved defects are returned in the report.

use crate::{
    record::OrderRecord,
    rng::Draw,
    types::RowIndex,
};
use chrono::Duration;
use rand::{seq::index, Rng};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_ERROR_FRACTION: f64 = crate::config::DEFAULT_ERROR_FRACTION;
pub const DUPLICATE_ID_PREFIX: &str = "DUPE-";
pub const PRICE_OUTLIER_FACTOR: f64 = 100.0;
const IMPLAUSIBLE_KM: (u32, u32) = (5_000, 10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DefectKind {
    MissingValue,
    Outlier,
    Typo,
    Duplicate,
    InconsistentDates,
}

impl DefectKind {
    pub const ALL: [DefectKind; 5] = [
        Self::MissingValue,
        Self::Outlier,
        Self::Typo,
        Self::Duplicate,
        Self::InconsistentDates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingValue      => "missing",
            Self::Outlier           => "outlier",
            Self::Typo              => "typo",
            Self::Duplicate         => "duplicate",
            Self::InconsistentDates => "inconsistent",
        }
    }
}

/// Fields the missing-value defect may null out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NullableField {
    ProductPrice,
    ShippingCost,
    LoyaltyMonths,
    Distance,
}

impl NullableField {
    pub const ALL: [NullableField; 4] = [
        Self::ProductPrice,
        Self::ShippingCost,
        Self::LoyaltyMonths,
        Self::Distance,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outlier {
    /// Price multiplied by `PRICE_OUTLIER_FACTOR`.
    PriceInflated,
    ImplausibleDistance { km: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Typo {
    CarrierLeadingSpace,
    StateLowercased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DateSkew {
    /// delivered = shipped - 2 days
    DeliveredBeforeShipped,
    /// shipped = ordered - 1 day
    ShippedBeforeOrdered,
}

/// A fully resolved defect for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Defect {
    MissingValue(NullableField),
    Outlier(Outlier),
    Typo(Typo),
    /// Copy of row `source`. `None` on the first row, where there is
    /// nothing to copy and the defect is a no-op.
    Duplicate { source: Option<RowIndex> },
    InconsistentDates(DateSkew),
}

impl Defect {
    pub fn kind(&self) -> DefectKind {
        match self {
            Self::MissingValue(_)      => DefectKind::MissingValue,
            Self::Outlier(_)           => DefectKind::Outlier,
            Self::Typo(_)              => DefectKind::Typo,
            Self::Duplicate { .. }     => DefectKind::Duplicate,
            Self::InconsistentDates(_) => DefectKind::InconsistentDates,
        }
    }

    /// False only for the first-row duplicate no-op.
    pub fn alters_row(&self) -> bool {
        !matches!(self, Self::Duplicate { source: None })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InjectionReport {
    /// (row, defect) in the order the rows were processed.
    pub applied: Vec<(RowIndex, Defect)>,
}

impl InjectionReport {
    pub fn selected_rows(&self) -> Vec<RowIndex> {
        self.applied.iter().map(|(row, _)| *row).collect()
    }

    /// Selected rows whose contents actually changed, ascending.
    pub fn altered_rows(&self) -> Vec<RowIndex> {
        let mut rows: Vec<_> = self
            .applied
            .iter()
            .filter(|(_, d)| d.alters_row())
            .map(|(row, _)| *row)
            .collect();
        rows.sort_unstable();
        rows
    }

    pub fn counts_by_kind(&self) -> BTreeMap<DefectKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, defect) in &self.applied {
            *counts.entry(defect.kind()).or_insert(0) += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorInjector {
    fraction: f64,
}

impl Default for ErrorInjector {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_FRACTION)
    }
}

impl ErrorInjector {
    /// `fraction` is clamped to [0, 1].
    pub fn new(fraction: f64) -> Self {
        Self { fraction: fraction.clamp(0.0, 1.0) }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// round(len × fraction), never more than `len`.
    pub fn target_count(&self, len: usize) -> usize {
        ((len as f64 * self.fraction).round() as usize).min(len)
    }

    /// Corrupt a sampled subset of `rows` in place.
    pub fn corrupt<R: Rng + ?Sized>(&self, rows: &mut [OrderRecord], rng: &mut R) -> InjectionReport {
        let target = self.target_count(rows.len());
        let selected = index::sample(rng, rows.len(), target);

        let mut report = InjectionReport::default();
        for row in selected.iter() {
            let defect = resolve_defect(row, rng);
            apply_defect(rows, row, defect);
            log::debug!("row {row}: {defect:?}");
            report.applied.push((row, defect));
        }

        let counts: Vec<String> = report
            .counts_by_kind()
            .iter()
            .map(|(kind, n)| format!("{}={n}", kind.name()))
            .collect();
        log::info!("injected {target} defects ({})", counts.join(", "));
        report
    }
}

/// Draw the defect for `row`. Kind is uniform over the five kinds; each
/// two-way sub-choice is a fair coin.
pub fn resolve_defect<R: Rng + ?Sized>(row: RowIndex, rng: &mut R) -> Defect {
    match *rng.pick_uniform(&DefectKind::ALL) {
        DefectKind::MissingValue => Defect::MissingValue(*rng.pick_uniform(&NullableField::ALL)),
        DefectKind::Outlier => {
            if rng.chance(0.5) {
                Defect::Outlier(Outlier::PriceInflated)
            } else {
                let km = rng.gen_range(IMPLAUSIBLE_KM.0..IMPLAUSIBLE_KM.1);
                Defect::Outlier(Outlier::ImplausibleDistance { km })
            }
        }
        DefectKind::Typo => {
            if rng.chance(0.5) {
                Defect::Typo(Typo::CarrierLeadingSpace)
            } else {
                Defect::Typo(Typo::StateLowercased)
            }
        }
        DefectKind::Duplicate => Defect::Duplicate { source: row.checked_sub(1) },
        DefectKind::InconsistentDates => {
            if rng.chance(0.5) {
                Defect::InconsistentDates(DateSkew::DeliveredBeforeShipped)
            } else {
                Defect::InconsistentDates(DateSkew::ShippedBeforeOrdered)
            }
        }
    }
}

/// Apply `defect` to `rows[row]`. Only that row is written.
pub fn apply_defect(rows: &mut [OrderRecord], row: RowIndex, defect: Defect) {
    match defect {
        Defect::MissingValue(field) => {
            let r = &mut rows[row];
            match field {
                NullableField::ProductPrice  => r.product_price_mxn = None,
                NullableField::ShippingCost  => r.shipping_cost_mxn = None,
                NullableField::LoyaltyMonths => r.customer_loyalty_months = None,
                NullableField::Distance      => r.distance_km = None,
            }
        }
        Defect::Outlier(Outlier::PriceInflated) => {
            if let Some(price) = rows[row].product_price_mxn.as_mut() {
                *price *= PRICE_OUTLIER_FACTOR;
            }
        }
        Defect::Outlier(Outlier::ImplausibleDistance { km }) => {
            rows[row].distance_km = Some(km);
        }
        Defect::Typo(Typo::CarrierLeadingSpace) => {
            rows[row].shipping_carrier.insert(0, ' ');
        }
        Defect::Typo(Typo::StateLowercased) => {
            rows[row].customer_state = rows[row].customer_state.to_lowercase();
        }
        Defect::Duplicate { source: Some(source) } => {
            let mut copy = rows[source].clone();
            copy.order_id = format!("{DUPLICATE_ID_PREFIX}{}", copy.order_id);
            rows[row] = copy;
        }
        Defect::Duplicate { source: None } => {}
        Defect::InconsistentDates(DateSkew::DeliveredBeforeShipped) => {
            let r = &mut rows[row];
            r.delivered_date = r.shipped_date - Duration::days(2);
        }
        Defect::InconsistentDates(DateSkew::ShippedBeforeOrdered) => {
            let r = &mut rows[row];
            r.shipped_date = r.order_date - Duration::days(1);
        }
    }
}
