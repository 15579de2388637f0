use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Age (in whole years) from which a subject is scored as an adult.
pub const ADULT_AGE_YEARS: u16 = 20;

/// Values computed from [`RawInputs`](super::inputs::RawInputs). Replaced as a
/// whole on every recompute; a field that does not apply is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DerivedFields {
    pub age_years: Option<u16>,
    pub is_adolescent: bool,
    pub bmi_adult: Option<f64>,
    pub bmi_z_score: Option<f64>,
}
