use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::demographics::{RaceEthnicity, Sex};

/// The parameter record handed to the risk-score model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskParams {
    /// Whole years; `None` only under the pass-through unknown-age policy.
    pub age: Option<u16>,
    pub sex: Sex,
    pub race: RaceEthnicity,
    pub bmi: Option<f64>,
    pub hdl: f64,
    pub sbp: f64,
    pub triglyceride: f64,
    pub glucose: f64,
    pub bmi_z_score: Option<f64>,
    /// Waist circumference in centimeters.
    pub waist: Option<f64>,
}
