use std::path::PathBuf;

use metscalc_core::models::demographics::Sex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowthError {
    #[error("growth reference has no rows")]
    EmptyReference,

    #[error("growth reference row {index}: {reason}")]
    InvalidRow { index: usize, reason: String },

    #[error("growth reference has two {sex} rows at {age_months} months")]
    DuplicateRow { sex: Sex, age_months: f64 },

    #[error("failed to read growth reference at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
