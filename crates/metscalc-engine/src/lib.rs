//! metscalc-engine
//!
//! The derived-value engine and score submission for the metabolic syndrome
//! severity calculator. Raw inputs go in field by field; every change
//! recomputes age, adult BMI and the pediatric BMI z-score as one unit, and
//! `submit` hands a validated parameter record to the risk-score model.

pub mod change;
pub mod collaborators;
pub mod config;
pub mod derive;
pub mod engine;
pub mod error;
pub mod submit;

pub use engine::Calculator;
