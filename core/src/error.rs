use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid distribution '{name}': {reason}")]
    Distribution { name: &'static str, reason: String },

    #[error("Reference data inconsistent: {reason}")]
    ReferenceData { reason: String },
}

pub type GenResult<T> = Result<T, GenError>;
