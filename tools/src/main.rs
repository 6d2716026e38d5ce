//! ecomsynth-runner: generates the Mexican e-commerce delivery dataset.
//!
//! Usage:
//!   ecomsynth-runner
//!
//! Seed, row count and output paths are compiled in. Set RUST_LOG to
//! change log verbosity (default: info).

use anyhow::Result;
use ecomsynth_core::{
    assembler::{Dataset, DatasetAssembler},
    config::GeneratorConfig,
    injector::InjectionReport,
    record::COLUMNS,
};

const RULE: &str = "============================================================";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GeneratorConfig::default();
    println!("{RULE}");
    println!("MEXICAN E-COMMERCE DATASET GENERATOR");
    println!("  seed:      {}", config.seed);
    println!("  records:   {}", config.n_records);
    println!("  errors:    {:.0}%", config.error_fraction * 100.0);
    println!("{RULE}");

    let mut assembler = DatasetAssembler::new(config)?;
    let (dataset, report) = assembler.generate_with_report(assembler.config().include_errors);

    print_columns();
    print_summary(&dataset, &report)?;

    let sample_size = assembler.config().sample_size;
    let sample = assembler.sample(&dataset, sample_size);
    assembler.write_outputs(&dataset, &sample)?;

    let config = assembler.config();
    println!();
    println!("{RULE}");
    println!("Files written:");
    println!("  1. {} ({} records)", config.dataset_path, dataset.len());
    println!("  2. {} ({} records)", config.sample_path, sample.len());
    println!("{RULE}");
    Ok(())
}

fn print_columns() {
    println!();
    println!("Columns ({}):", COLUMNS.len());
    for (i, name) in COLUMNS.iter().enumerate() {
        println!("  {:2}. {name}", i + 1);
    }
}

fn print_summary(dataset: &Dataset, report: &InjectionReport) -> Result<()> {
    let summary = dataset.summary();

    println!();
    println!("=== DATASET SUMMARY ===");
    println!("  total records:  {}", summary.row_count);
    println!("  columns:        {}", summary.column_count);
    println!("  corrupted rows: {}", report.altered_rows().len());

    println!();
    println!("Carrier distribution:");
    for (carrier, share) in &summary.carrier_share {
        println!("  {:<20}: {:.1}%", carrier, share * 100.0);
    }

    println!();
    println!("  mean delivery days: {:.1}", summary.mean_delivery_days);
    println!("  mean delay days:    {:.1}", summary.mean_delay_days);
    println!("  on-time rate:       {:.1}%", summary.on_time_rate * 100.0);
    println!("  mean rating:        {:.1}/5.0", summary.mean_rating);

    log::debug!("summary: {}", summary.to_json()?);
    Ok(())
}
