use std::path::PathBuf;

use metscalc_core::error::{UnitError, UnknownChoice};
use thiserror::Error;

use crate::submit::RequiredInput;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown input field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("{field} must be a YYYY-MM-DD date; got: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error(transparent)]
    Choice(#[from] UnknownChoice),

    #[error("cannot calculate yet; missing {}", describe(.missing))]
    IncompleteInputs { missing: Vec<RequiredInput> },
}

fn describe(missing: &[RequiredInput]) -> String {
    missing
        .iter()
        .map(|input| input.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config already exists at {}; pass --force to overwrite", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error(
        "config_version {found} is newer than this build supports ({supported}). \
         Please update metscalc."
    )]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}
