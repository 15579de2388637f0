//! Assembly of the risk-score parameter record.

use std::fmt;

use metscalc_core::models::derived::DerivedFields;
use metscalc_core::models::inputs::RawInputs;
use metscalc_core::models::params::RiskParams;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::error::EngineError;

/// An input the risk-score model cannot do without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredInput {
    Sex,
    RaceEthnicity,
    SystolicBp,
    FastingGlucose,
    Hdl,
    Triglyceride,
    /// Weight and height together, or (adults only) waist circumference.
    BodySize,
}

impl RequiredInput {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sex => "sex",
            Self::RaceEthnicity => "race and ethnicity",
            Self::SystolicBp => "systolic blood pressure",
            Self::FastingGlucose => "fasting glucose",
            Self::Hdl => "HDL",
            Self::Triglyceride => "triglycerides",
            Self::BodySize => "weight and height, or waist circumference",
        }
    }
}

impl fmt::Display for RequiredInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Waist circumference in centimeters, if it can be used for this subject.
/// Adolescents are scored without it.
fn usable_waist_cm(raw: &RawInputs, derived: &DerivedFields) -> Option<f64> {
    if derived.is_adolescent {
        return None;
    }
    match raw.waist_circumference.centimeters()? {
        Ok(cm) => Some(cm),
        Err(err) => {
            debug!(%err, "waist circumference not usable");
            None
        }
    }
}

/// A lab value the model can take: finite and not negative.
fn usable_lab(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Inputs still needed before the record can be scored, in form order.
///
/// An entered value that cannot be used (a negative lab, a weight that does
/// not convert) counts as missing.
pub fn missing_inputs(raw: &RawInputs, derived: &DerivedFields) -> Vec<RequiredInput> {
    let mut missing = Vec::new();
    if raw.sex.is_none() {
        missing.push(RequiredInput::Sex);
    }
    if raw.race_ethnicity.is_none() {
        missing.push(RequiredInput::RaceEthnicity);
    }
    let labs = [
        (raw.systolic_bp, RequiredInput::SystolicBp),
        (raw.fasting_glucose, RequiredInput::FastingGlucose),
        (raw.triglyceride, RequiredInput::Triglyceride),
        (raw.hdl, RequiredInput::Hdl),
    ];
    for (value, input) in labs {
        if usable_lab(value).is_none() {
            missing.push(input);
        }
    }
    if derived.bmi_adult.is_none() && usable_waist_cm(raw, derived).is_none() {
        missing.push(RequiredInput::BodySize);
    }
    missing
}

/// Build the record sent to the risk-score model.
///
/// Fails with [`EngineError::IncompleteInputs`] unless every
/// [`RequiredInput`] is present and usable.
pub fn assemble_params(
    raw: &RawInputs,
    derived: &DerivedFields,
    config: &CalculatorConfig,
) -> Result<RiskParams, EngineError> {
    let missing = missing_inputs(raw, derived);
    let (Some(sex), Some(race), Some(sbp), Some(glucose), Some(triglyceride), Some(hdl), true) = (
        raw.sex,
        raw.race_ethnicity,
        usable_lab(raw.systolic_bp),
        usable_lab(raw.fasting_glucose),
        usable_lab(raw.triglyceride),
        usable_lab(raw.hdl),
        missing.is_empty(),
    ) else {
        return Err(EngineError::IncompleteInputs { missing });
    };

    Ok(RiskParams {
        age: derived.age_years.or_else(|| config.unknown_age.age()),
        sex,
        race,
        bmi: derived.bmi_adult,
        hdl,
        sbp,
        triglyceride,
        glucose,
        bmi_z_score: derived.bmi_z_score,
        waist: usable_waist_cm(raw, derived),
    })
}
