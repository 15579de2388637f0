//! Unit normalization.
//!
//! Every measurement is converted into one canonical unit per quantity kind
//! before it is used: lengths into meters (for BMI) or centimeters (for waist
//! circumference), masses into kilograms. Conversions never round.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::UnitError;

const INCHES_PER_METER: f64 = 39.37;
const CENTIMETERS_PER_INCH: f64 = 2.54;
const POUNDS_PER_KILOGRAM: f64 = 2.205;

/// Unit tag for a length measurement (height, waist circumference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LengthUnit {
    #[serde(rename = "in")]
    Inches,
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "m")]
    Meters,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 3] = [Self::Inches, Self::Centimeters, Self::Meters];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Centimeters => "cm",
            Self::Meters => "m",
        }
    }

    /// Label for a unit selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inches => "Inches (in)",
            Self::Centimeters => "Centimeters (cm)",
            Self::Meters => "Meters (m)",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Self::Inches),
            "cm" => Ok(Self::Centimeters),
            "m" => Ok(Self::Meters),
            other => Err(UnitError::InvalidUnit {
                quantity: "length",
                expected: "'m', 'cm', or 'in'",
                unit: other.to_string(),
            }),
        }
    }
}

/// Unit tag for a mass measurement (body weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MassUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
}

impl MassUnit {
    pub const ALL: [MassUnit; 2] = [Self::Pounds, Self::Kilograms];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lbs",
        }
    }

    /// Label for a unit selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kilograms => "Kilograms (kg)",
            Self::Pounds => "Pounds (lbs)",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MassUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kg" => Ok(Self::Kilograms),
            "lbs" => Ok(Self::Pounds),
            other => Err(UnitError::InvalidUnit {
                quantity: "mass",
                expected: "'kg' or 'lbs'",
                unit: other.to_string(),
            }),
        }
    }
}

fn checked(quantity: &'static str, value: f64) -> Result<f64, UnitError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(UnitError::InvalidNumber {
            quantity,
            value: value.to_string(),
        })
    }
}

/// Converts a length into meters.
pub fn to_meters(length: f64, unit: LengthUnit) -> Result<f64, UnitError> {
    let length = checked("length", length)?;
    Ok(match unit {
        LengthUnit::Meters => length,
        LengthUnit::Centimeters => length / 100.0,
        LengthUnit::Inches => length / INCHES_PER_METER,
    })
}

/// Converts a length into centimeters.
pub fn to_centimeters(length: f64, unit: LengthUnit) -> Result<f64, UnitError> {
    let length = checked("length", length)?;
    Ok(match unit {
        LengthUnit::Centimeters => length,
        LengthUnit::Meters => length * 100.0,
        LengthUnit::Inches => length * CENTIMETERS_PER_INCH,
    })
}

/// Converts a mass into kilograms.
pub fn to_kilograms(mass: f64, unit: MassUnit) -> Result<f64, UnitError> {
    let mass = checked("mass", mass)?;
    Ok(match unit {
        MassUnit::Kilograms => mass,
        MassUnit::Pounds => mass / POUNDS_PER_KILOGRAM,
    })
}

/// Parses free text from an input control into a measurement value.
pub fn parse_quantity(quantity: &'static str, text: &str) -> Result<f64, UnitError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| UnitError::InvalidNumber {
            quantity,
            value: text.to_string(),
        })?;
    checked(quantity, value)
}

pub fn meters_from_text(length: &str, unit: &str) -> Result<f64, UnitError> {
    to_meters(parse_quantity("length", length)?, unit.parse()?)
}

pub fn centimeters_from_text(length: &str, unit: &str) -> Result<f64, UnitError> {
    to_centimeters(parse_quantity("length", length)?, unit.parse()?)
}

pub fn kilograms_from_text(mass: &str, unit: &str) -> Result<f64, UnitError> {
    to_kilograms(parse_quantity("mass", mass)?, unit.parse()?)
}
