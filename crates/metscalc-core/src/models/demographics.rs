use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::UnknownChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Self::Male, Self::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(UnknownChoice {
                domain: "sex",
                value: s.to_string(),
            }),
        }
    }
}

/// Race/ethnicity groups the severity model is normed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RaceEthnicity {
    Hispanic,
    NonHispanicBlack,
    NonHispanicWhite,
}

impl RaceEthnicity {
    pub const ALL: [RaceEthnicity; 3] = [
        Self::Hispanic,
        Self::NonHispanicBlack,
        Self::NonHispanicWhite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hispanic => "hispanic",
            Self::NonHispanicBlack => "non_hispanic_black",
            Self::NonHispanicWhite => "non_hispanic_white",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hispanic => "Hispanic",
            Self::NonHispanicBlack => "Non-Hispanic Black",
            Self::NonHispanicWhite => "Non-Hispanic White",
        }
    }
}

impl fmt::Display for RaceEthnicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaceEthnicity {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hispanic" => Ok(Self::Hispanic),
            "non_hispanic_black" | "non-hispanic black" | "black" => Ok(Self::NonHispanicBlack),
            "non_hispanic_white" | "non-hispanic white" | "white" => Ok(Self::NonHispanicWhite),
            _ => Err(UnknownChoice {
                domain: "race/ethnicity",
                value: s.to_string(),
            }),
        }
    }
}
