//! Single-field edits to [`RawInputs`].
//!
//! The presentation layer reports edits as a control name plus the text it
//! holds. [`RawChange::parse`] turns that pair into a typed change; empty
//! text clears the field.

use jiff::civil::Date;
use metscalc_core::models::demographics::{RaceEthnicity, Sex};
use metscalc_core::models::inputs::RawInputs;
use metscalc_core::units::{self, LengthUnit, MassUnit};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawChange {
    BirthDate(Option<Date>),
    AppointmentDate(Option<Date>),
    Sex(Option<Sex>),
    RaceEthnicity(Option<RaceEthnicity>),
    SystolicBp(Option<f64>),
    FastingGlucose(Option<f64>),
    Triglyceride(Option<f64>),
    Hdl(Option<f64>),
    Weight(Option<f64>),
    WeightUnit(MassUnit),
    Height(Option<f64>),
    HeightUnit(LengthUnit),
    Waist(Option<f64>),
    WaistUnit(LengthUnit),
}

impl RawChange {
    /// Control name this change corresponds to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BirthDate(_) => "birth",
            Self::AppointmentDate(_) => "appointment",
            Self::Sex(_) => "sex",
            Self::RaceEthnicity(_) => "race",
            Self::SystolicBp(_) => "sbp",
            Self::FastingGlucose(_) => "glucose",
            Self::Triglyceride(_) => "triglyceride",
            Self::Hdl(_) => "hdl",
            Self::Weight(_) => "weight",
            Self::WeightUnit(_) => "weightUnit",
            Self::Height(_) => "height",
            Self::HeightUnit(_) => "heightUnit",
            Self::Waist(_) => "waist",
            Self::WaistUnit(_) => "waistUnit",
        }
    }

    pub fn apply(self, raw: &mut RawInputs) {
        match self {
            Self::BirthDate(v) => raw.birth_date = v,
            Self::AppointmentDate(v) => raw.appointment_date = v,
            Self::Sex(v) => raw.sex = v,
            Self::RaceEthnicity(v) => raw.race_ethnicity = v,
            Self::SystolicBp(v) => raw.systolic_bp = v,
            Self::FastingGlucose(v) => raw.fasting_glucose = v,
            Self::Triglyceride(v) => raw.triglyceride = v,
            Self::Hdl(v) => raw.hdl = v,
            Self::Weight(v) => raw.weight.value = v,
            Self::WeightUnit(u) => raw.weight.unit = u,
            Self::Height(v) => raw.height.value = v,
            Self::HeightUnit(u) => raw.height.unit = u,
            Self::Waist(v) => raw.waist_circumference.value = v,
            Self::WaistUnit(u) => raw.waist_circumference.unit = u,
        }
    }

    /// Parse a control edit. Accepts the control names returned by
    /// [`RawChange::field`] and their snake_case record field names.
    pub fn parse(field: &str, text: &str) -> Result<Self, EngineError> {
        let change = match field {
            "birth" | "birth_date" => Self::BirthDate(date("birth", text)?),
            "appointment" | "appointment_date" => {
                Self::AppointmentDate(date("appointment", text)?)
            }
            "sex" => Self::Sex(optional(text).map(str::parse).transpose()?),
            "race" | "race_ethnicity" => {
                Self::RaceEthnicity(optional(text).map(str::parse).transpose()?)
            }
            "sbp" | "systolic_bp" => Self::SystolicBp(quantity("systolic blood pressure", text)?),
            "glucose" | "fasting_glucose" => {
                Self::FastingGlucose(quantity("fasting glucose", text)?)
            }
            "triglyceride" => Self::Triglyceride(quantity("triglyceride", text)?),
            "hdl" => Self::Hdl(quantity("HDL", text)?),
            "weight" => Self::Weight(quantity("mass", text)?),
            "weightUnit" | "weight_unit" => Self::WeightUnit(text.parse()?),
            "height" => Self::Height(quantity("length", text)?),
            "heightUnit" | "height_unit" => Self::HeightUnit(text.parse()?),
            "waist" | "waist_circumference" => Self::Waist(quantity("length", text)?),
            "waistUnit" | "waist_unit" => Self::WaistUnit(text.parse()?),
            other => return Err(EngineError::UnknownField(other.to_string())),
        };
        Ok(change)
    }
}

fn optional(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn quantity(name: &'static str, text: &str) -> Result<Option<f64>, EngineError> {
    Ok(optional(text)
        .map(|t| units::parse_quantity(name, t))
        .transpose()?)
}

fn date(field: &'static str, text: &str) -> Result<Option<Date>, EngineError> {
    optional(text)
        .map(|t| {
            t.parse::<Date>().map_err(|_| EngineError::InvalidDate {
                field,
                value: t.to_string(),
            })
        })
        .transpose()
}
