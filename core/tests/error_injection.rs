//! Corruption coverage and the duplicate defect.

use ecomsynth_core::{
    assembler::DatasetAssembler,
    config::GeneratorConfig,
    injector::{Defect, DefectKind},
    record::OrderRecord,
};
use std::collections::HashMap;

fn generate(n: usize, include_errors: bool) -> (Vec<OrderRecord>, ecomsynth_core::injector::InjectionReport) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut asm = DatasetAssembler::new(GeneratorConfig::default_test().with_records(n)).unwrap();
    let (data, report) = asm.generate_with_report(include_errors);
    (data.rows, report)
}

fn without_id(r: &OrderRecord) -> OrderRecord {
    OrderRecord { order_id: String::new(), ..r.clone() }
}

#[test]
fn five_percent_of_rows_are_selected() {
    let (clean, _) = generate(10_000, false);
    let (dirty, report) = generate(10_000, true);

    assert_eq!(report.selected_rows().len(), 500);
    assert_eq!(dirty.len(), clean.len());

    let changed: Vec<usize> = (0..clean.len()).filter(|&i| dirty[i] != clean[i]).collect();
    assert_eq!(changed, report.altered_rows());
}

#[test]
fn every_defect_kind_occurs() {
    let (_, report) = generate(10_000, true);
    let counts = report.counts_by_kind();
    for kind in DefectKind::ALL {
        let n = counts.get(&kind).copied().unwrap_or(0);
        // 500 draws over 5 kinds: ~100 each.
        assert!(n > 50, "{} occurred only {n} times", kind.name());
    }
}

#[test]
fn duplicates_match_predecessor_at_copy_time() {
    let (clean, _) = generate(10_000, false);
    let (dirty, report) = generate(10_000, true);

    let position: HashMap<usize, usize> = report
        .applied
        .iter()
        .enumerate()
        .map(|(pos, (row, _))| (*row, pos))
        .collect();

    let mut checked = 0;
    for (pos, (row, defect)) in report.applied.iter().enumerate() {
        let Defect::Duplicate { source: Some(source) } = defect else { continue };
        assert_eq!(*source, row - 1);

        // The predecessor's value at copy time: its final value if it was
        // corrupted earlier (or never), its clean value if corrupted later.
        let predecessor = match position.get(source) {
            Some(&p) if p > pos => &clean[*source],
            _ => &dirty[*source],
        };
        let dupe = &dirty[*row];
        assert_eq!(dupe.order_id, format!("DUPE-{}", predecessor.order_id));
        assert_eq!(without_id(dupe), without_id(predecessor), "row {row}");
        checked += 1;
    }
    assert!(checked > 0, "no duplicate defects drawn");

    let dupe_rows = dirty.iter().filter(|r| r.order_id.starts_with("DUPE-")).count();
    assert_eq!(dupe_rows, checked);
}

#[test]
fn without_errors_report_is_empty() {
    let (rows, report) = generate(200, false);
    assert!(report.applied.is_empty());
    assert!(rows.iter().all(|r| !r.order_id.starts_with("DUPE-")));
}
