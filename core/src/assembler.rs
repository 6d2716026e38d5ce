//! DatasetAssembler: drives the synthesizer, the injector and the sampler.
//!
//! EXECUTION ORDER (fixed, every draw from the one run stream):
//!   1. N × RecordSynthesizer::produce_record
//!   2. ErrorInjector::corrupt over the whole table (optional)
//!   3. uniform subsample without replacement
//!   4. CSV output of both tables

use crate::{
    config::GeneratorConfig,
    error::GenResult,
    injector::{ErrorInjector, InjectionReport},
    output,
    record::OrderRecord,
    reference::ReferenceTables,
    rng::GenRng,
    summary::DatasetSummary,
    synthesizer::RecordSynthesizer,
};
use rand::seq::index;

pub const PROGRESS_INTERVAL: usize = 1_000;

/// Rows in generation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<OrderRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_rows(&self.rows)
    }

    pub fn to_csv_bytes(&self) -> GenResult<Vec<u8>> {
        output::to_csv_bytes(&self.rows)
    }
}

/// Everything produced by a full run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub sample: Dataset,
    pub report: InjectionReport,
}

pub struct DatasetAssembler {
    config: GeneratorConfig,
    synthesizer: RecordSynthesizer,
    injector: ErrorInjector,
    rng: GenRng,
}

impl DatasetAssembler {
    pub fn new(config: GeneratorConfig) -> GenResult<Self> {
        let tables = ReferenceTables::mexico()?;
        Self::with_tables(config, tables)
    }

    pub fn with_tables(config: GeneratorConfig, tables: ReferenceTables) -> GenResult<Self> {
        tables.validate()?;
        log::debug!("config: {}", serde_json::to_string(&config)?);
        let synthesizer = RecordSynthesizer::new(tables, config.anchor)?;
        Ok(Self {
            injector: ErrorInjector::new(config.error_fraction),
            rng: GenRng::seeded(config.seed),
            synthesizer,
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn tables(&self) -> &ReferenceTables {
        self.synthesizer.tables()
    }

    pub fn generate(&mut self, include_errors: bool) -> Dataset {
        self.generate_with_report(include_errors).0
    }

    /// Produce `n_records` rows, then corrupt them when `include_errors`.
    /// The report is empty when no errors were requested.
    pub fn generate_with_report(&mut self, include_errors: bool) -> (Dataset, InjectionReport) {
        let n = self.config.n_records;
        log::info!("generating {n} records (seed {})", self.rng.seed());

        let mut rows = Vec::with_capacity(n);
        for seq in 0..n {
            rows.push(self.synthesizer.produce_record(seq, &mut self.rng));
            if (seq + 1) % PROGRESS_INTERVAL == 0 {
                log::info!("  generated {}/{n} records", seq + 1);
            }
        }

        let report = if include_errors {
            log::info!(
                "adding controlled errors to {:.0}% of rows",
                self.injector.fraction() * 100.0
            );
            self.injector.corrupt(&mut rows, &mut self.rng)
        } else {
            InjectionReport::default()
        };

        (Dataset { rows }, report)
    }

    /// min(n, len) rows drawn uniformly without replacement, in draw order.
    pub fn sample(&mut self, dataset: &Dataset, n: usize) -> Dataset {
        let amount = n.min(dataset.len());
        let picked = index::sample(&mut self.rng, dataset.len(), amount);
        Dataset {
            rows: picked.iter().map(|i| dataset.rows[i].clone()).collect(),
        }
    }

    /// Generate, sample and write both files to the configured paths.
    pub fn run(&mut self) -> GenResult<RunOutput> {
        let (dataset, report) = self.generate_with_report(self.config.include_errors);
        let sample = self.sample(&dataset, self.config.sample_size);
        self.write_outputs(&dataset, &sample)?;
        Ok(RunOutput { dataset, sample, report })
    }

    pub fn write_outputs(&self, dataset: &Dataset, sample: &Dataset) -> GenResult<()> {
        output::write_csv(&self.config.dataset_path, &dataset.rows)?;
        output::write_csv(&self.config.sample_path, &sample.rows)?;
        Ok(())
    }
}
