//! Empirical shares over 10,000 rows against the configured weights.

use ecomsynth_core::{
    assembler::{Dataset, DatasetAssembler},
    config::GeneratorConfig,
    record::OrderRecord,
    synthesizer::issue_weights,
    types::{DeliveryIssue, DistanceTier},
};
use std::collections::HashMap;

const TOLERANCE: f64 = 0.03;

fn dataset() -> (Dataset, DatasetAssembler) {
    let mut asm = DatasetAssembler::new(GeneratorConfig::default().with_errors(false)).unwrap();
    let data = asm.generate(false);
    (data, asm)
}

fn shares(rows: &[OrderRecord], key: impl Fn(&OrderRecord) -> &str) -> HashMap<String, f64> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in rows {
        *counts.entry(key(r).to_string()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(k, v)| (k, v as f64 / rows.len() as f64))
        .collect()
}

fn assert_close(label: &str, observed: &HashMap<String, f64>, expected: &[(&str, f64)]) {
    for (name, p) in expected {
        let got = observed.get(*name).copied().unwrap_or(0.0);
        assert!(
            (got - p).abs() <= TOLERANCE,
            "{label} '{name}': observed {got:.3}, configured {p:.3}"
        );
    }
}

#[test]
fn carrier_category_and_payment_shares() {
    let (data, asm) = dataset();
    let tables = asm.tables();

    let carriers: Vec<(&str, f64)> = tables.carriers.iter().map(|c| (c.name, c.probability)).collect();
    assert_close("carrier", &shares(&data.rows, |r| r.shipping_carrier.as_str()), &carriers);

    let categories: Vec<(&str, f64)> =
        tables.categories.iter().map(|c| (c.name, c.probability)).collect();
    assert_close("category", &shares(&data.rows, |r| r.product_category.as_str()), &categories);

    assert_close("payment", &shares(&data.rows, |r| r.payment_method.as_str()), &tables.payment_methods);
    assert_close("platform", &shares(&data.rows, |r| r.platform_name.as_str()), &tables.sales_channels);
}

#[test]
fn continuous_draws_have_expected_means() {
    let (data, _) = dataset();
    let n = data.len() as f64;

    let freq: f64 = data.rows.iter().map(|r| f64::from(r.purchase_frequency)).sum::<f64>() / n;
    assert!((freq - 2.5).abs() < 0.1, "purchase frequency mean {freq}");

    // trunc(Exp(mean 12)) has mean ≈ 11.5
    let loyalty: f64 = data
        .rows
        .iter()
        .map(|r| f64::from(r.customer_loyalty_months.unwrap()))
        .sum::<f64>()
        / n;
    assert!((10.5..12.5).contains(&loyalty), "loyalty mean {loyalty}");

    let express = data.rows.iter().filter(|r| r.shipping_tier.is_express()).count() as f64 / n;
    assert!((express - 0.15).abs() < TOLERANCE, "express share {express}");

    let urban = data.rows.iter().filter(|r| r.is_urban == 1).count() as f64 / n;
    assert!((urban - 0.75).abs() < TOLERANCE, "urban share {urban}");
}

#[test]
fn delivery_issues_follow_delay_bucket() {
    let (data, _) = dataset();
    let (late, on_time): (Vec<&OrderRecord>, Vec<&OrderRecord>) =
        data.rows.iter().partition(|r| r.delivery_delay_days > 2);
    assert!(late.len() > 1_000, "only {} late rows", late.len());

    for (label, rows, delay) in [("on-time", &on_time, 0), ("late", &late, 3)] {
        let mut counts: HashMap<DeliveryIssue, usize> = HashMap::new();
        for r in rows.iter() {
            *counts.entry(r.delivery_issue).or_insert(0) += 1;
        }
        let weights = issue_weights(delay);
        for issue in DeliveryIssue::ALL {
            let expected = weights.iter().find(|(i, _)| *i == issue).map_or(0.0, |w| w.1);
            let got = counts.get(&issue).copied().unwrap_or(0) as f64 / rows.len() as f64;
            assert!(
                (got - expected).abs() <= TOLERANCE,
                "{label} {issue:?}: observed {got:.3}, configured {expected:.3}"
            );
        }
    }
}

#[test]
fn peak_season_slows_transit_for_same_carrier_and_tier() {
    let (data, asm) = dataset();
    let mean = |v: &[i64]| v.iter().sum::<i64>() as f64 / v.len() as f64;

    let mut compared = 0;
    for carrier in &asm.tables().carriers {
        for tier in DistanceTier::ALL {
            let (peak, off_peak): (Vec<&OrderRecord>, Vec<&OrderRecord>) = data
                .rows
                .iter()
                .filter(|r| r.shipping_carrier == carrier.name && r.shipping_type == tier)
                .partition(|r| r.is_peak_season == 1);
            if peak.len() < 30 || off_peak.len() < 30 {
                continue;
            }
            let peak_days: Vec<i64> = peak.iter().map(|r| r.actual_delivery_days).collect();
            let off_days: Vec<i64> = off_peak.iter().map(|r| r.actual_delivery_days).collect();
            let (p, o) = (mean(&peak_days), mean(&off_days));
            assert!(
                p > o * 1.15,
                "{} {tier}: peak mean {p:.2} days vs off-peak {o:.2}",
                carrier.name
            );
            compared += 1;
        }
    }
    assert!(compared >= 10, "only {compared} carrier/tier groups had enough rows");
}
