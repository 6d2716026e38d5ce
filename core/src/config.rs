use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_RECORDS: usize = 10_000;
pub const DEFAULT_ERROR_FRACTION: f64 = 0.05;
pub const DEFAULT_SAMPLE_SIZE: usize = 1_000;
pub const DEFAULT_DATASET_PATH: &str = "data/raw/dataset_raw.csv";
pub const DEFAULT_SAMPLE_PATH: &str = "data/raw/dataset_sample_1000.csv";

/// Everything a generation run needs besides the reference tables.
///
/// Defaults are compiled in; nothing is read from flags or the
/// environment. `anchor` stands in for "now" so the trailing one-year
/// window of order dates is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub n_records: usize,
    pub include_errors: bool,
    pub error_fraction: f64,
    pub sample_size: usize,
    pub anchor: NaiveDateTime,
    pub dataset_path: String,
    pub sample_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            n_records: DEFAULT_RECORDS,
            include_errors: true,
            error_fraction: DEFAULT_ERROR_FRACTION,
            sample_size: DEFAULT_SAMPLE_SIZE,
            anchor: default_anchor(),
            dataset_path: DEFAULT_DATASET_PATH.into(),
            sample_path: DEFAULT_SAMPLE_PATH.into(),
        }
    }
}

impl GeneratorConfig {
    /// Config with a small row count for use in tests.
    pub fn default_test() -> Self {
        Self {
            n_records: 100,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_records(mut self, n_records: usize) -> Self {
        self.n_records = n_records;
        self
    }

    pub fn with_errors(mut self, include_errors: bool) -> Self {
        self.include_errors = include_errors;
        self
    }
}

/// 2025-12-25 00:00:00, the date the dataset was first published.
/// An invalid literal here fails the build, not the run.
pub const DEFAULT_ANCHOR: NaiveDateTime = match NaiveDate::from_ymd_opt(2025, 12, 25) {
    Some(date) => match date.and_hms_opt(0, 0, 0) {
        Some(ts) => ts,
        None => panic!("DEFAULT_ANCHOR time of day is out of range"),
    },
    None => panic!("DEFAULT_ANCHOR date is out of range"),
};

pub fn default_anchor() -> NaiveDateTime {
    DEFAULT_ANCHOR
}
