use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::demographics::{RaceEthnicity, Sex};
use crate::error::UnitError;
use crate::units::{self, LengthUnit, MassUnit};

/// A length measurement and the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Length {
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self {
            value: Some(value),
            unit,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// `None` when no value has been entered.
    pub fn meters(&self) -> Option<Result<f64, UnitError>> {
        self.value.map(|v| units::to_meters(v, self.unit))
    }

    /// `None` when no value has been entered.
    pub fn centimeters(&self) -> Option<Result<f64, UnitError>> {
        self.value.map(|v| units::to_centimeters(v, self.unit))
    }
}

/// A mass measurement and the unit it was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Mass {
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: MassUnit,
}

impl Mass {
    pub fn new(value: f64, unit: MassUnit) -> Self {
        Self {
            value: Some(value),
            unit,
        }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// `None` when no value has been entered.
    pub fn kilograms(&self) -> Option<Result<f64, UnitError>> {
        self.value.map(|v| units::to_kilograms(v, self.unit))
    }
}

/// Everything the user has entered so far. Unset fields are `None`.
///
/// Lab values (`systolic_bp` in mmHg; glucose, triglyceride and HDL in
/// mg/dL) are carried as entered and never unit-converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct RawInputs {
    pub birth_date: Option<Date>,
    pub appointment_date: Option<Date>,
    pub sex: Option<Sex>,
    pub race_ethnicity: Option<RaceEthnicity>,
    pub systolic_bp: Option<f64>,
    pub fasting_glucose: Option<f64>,
    pub triglyceride: Option<f64>,
    pub hdl: Option<f64>,
    pub weight: Mass,
    pub height: Length,
    pub waist_circumference: Length,
}

impl RawInputs {
    /// An empty record with the appointment set to `appointment_date`.
    pub fn on(appointment_date: Date) -> Self {
        Self {
            birth_date: None,
            appointment_date: Some(appointment_date),
            sex: None,
            race_ethnicity: None,
            systolic_bp: None,
            fasting_glucose: None,
            triglyceride: None,
            hdl: None,
            weight: Mass::default(),
            height: Length::default(),
            waist_circumference: Length::default(),
        }
    }
}

impl Default for RawInputs {
    /// An empty record with the appointment set to today's local date.
    fn default() -> Self {
        Self::on(jiff::Zoned::now().date())
    }
}
