//! The secondary 1000-row sample.

use ecomsynth_core::{assembler::DatasetAssembler, config::GeneratorConfig};
use std::collections::HashSet;

fn assembler(n: usize) -> DatasetAssembler {
    DatasetAssembler::new(GeneratorConfig::default_test().with_records(n)).unwrap()
}

#[test]
fn sample_rows_come_from_dataset() {
    let mut asm = assembler(3_000);
    let data = asm.generate(true);
    let sample = asm.sample(&data, 1_000);

    assert_eq!(sample.len(), 1_000);
    let full: Vec<_> = data.rows.iter().collect();
    for row in &sample.rows {
        assert!(full.contains(&row), "sampled row {} not in dataset", row.order_id);
    }
}

#[test]
fn sample_is_capped_at_dataset_size() {
    let mut asm = assembler(300);
    let data = asm.generate(false);
    let sample = asm.sample(&data, 1_000);
    assert_eq!(sample.len(), 300);

    let ids: HashSet<_> = sample.rows.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids.len(), 300, "sample drew a row twice");
}

#[test]
fn sample_is_deterministic() {
    let mut a = assembler(2_000);
    let mut b = assembler(2_000);
    let da = a.generate(true);
    let db = b.generate(true);
    assert_eq!(a.sample(&da, 1_000), b.sample(&db, 1_000));
}
