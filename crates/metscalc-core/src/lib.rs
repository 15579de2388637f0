//! metscalc-core
//!
//! Pure domain types and unit conversion for the metabolic syndrome severity
//! calculator. No I/O — this is the shared vocabulary of the metscalc crates.

pub mod error;
pub mod models;
pub mod units;
