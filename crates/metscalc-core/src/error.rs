use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("{quantity} must be a non-negative number; got: {value}")]
    InvalidNumber { quantity: &'static str, value: String },

    #[error("{quantity} units must be one of {expected}; got: {unit}")]
    InvalidUnit {
        quantity: &'static str,
        expected: &'static str,
        unit: String,
    },
}

/// A categorical value outside its enumerated domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {domain}: {value}")]
pub struct UnknownChoice {
    pub domain: &'static str,
    pub value: String,
}
