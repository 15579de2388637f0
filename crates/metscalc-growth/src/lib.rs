//! metscalc-growth
//!
//! Anthropometric reference math. Pure data, no I/O beyond loading a
//! reference table. Provides the adult BMI formula and BMI-for-age z-scores
//! computed with the LMS method from a growth reference table.

pub mod bmi;
pub mod error;
pub mod lms;
