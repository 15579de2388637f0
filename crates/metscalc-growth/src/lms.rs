//! BMI-for-age z-scores via the LMS method.
//!
//! A growth reference gives, for each sex and age in months, the Box-Cox
//! power (L), median (M) and coefficient of variation (S) of BMI. The
//! z-score of an observed BMI `x` is `((x/M)^L - 1) / (L*S)`, or
//! `ln(x/M) / S` when `L` is zero. Between tabulated ages L, M and S are
//! interpolated linearly; outside the tabulated span there is no score.

use std::path::Path;

use metscalc_core::models::demographics::Sex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bmi::body_mass_index;
use crate::error::GrowthError;

/// One row of a growth reference table (CDC 2000 BMI-for-age layout).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LmsRow {
    pub sex: Sex,
    pub age_months: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

/// Box-Cox parameters at a single age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl Lms {
    pub fn z_score(&self, value: f64) -> f64 {
        if self.l.abs() < f64::EPSILON {
            (value / self.m).ln() / self.s
        } else {
            ((value / self.m).powf(self.l) - 1.0) / (self.l * self.s)
        }
    }

    fn lerp(lo: &LmsRow, hi: &LmsRow, age_months: f64) -> Self {
        let t = (age_months - lo.age_months) / (hi.age_months - lo.age_months);
        Self {
            l: lo.l + (hi.l - lo.l) * t,
            m: lo.m + (hi.m - lo.m) * t,
            s: lo.s + (hi.s - lo.s) * t,
        }
    }
}

impl From<&LmsRow> for Lms {
    fn from(row: &LmsRow) -> Self {
        Self {
            l: row.l,
            m: row.m,
            s: row.s,
        }
    }
}

/// A validated growth reference, split by sex and sorted by age.
#[derive(Debug, Clone)]
pub struct LmsReference {
    male: Vec<LmsRow>,
    female: Vec<LmsRow>,
}

impl LmsReference {
    pub fn new(rows: Vec<LmsRow>) -> Result<Self, GrowthError> {
        if rows.is_empty() {
            return Err(GrowthError::EmptyReference);
        }

        for (index, row) in rows.iter().enumerate() {
            let invalid = |reason: &str| GrowthError::InvalidRow {
                index,
                reason: reason.to_string(),
            };
            if ![row.age_months, row.l, row.m, row.s]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(invalid("values must be finite"));
            }
            if row.age_months < 0.0 {
                return Err(invalid("age_months must not be negative"));
            }
            if row.m <= 0.0 || row.s <= 0.0 {
                return Err(invalid("M and S must be positive"));
            }
        }

        let (mut male, mut female): (Vec<_>, Vec<_>) =
            rows.into_iter().partition(|row| row.sex == Sex::Male);
        for table in [&mut male, &mut female] {
            table.sort_by(|a, b| a.age_months.total_cmp(&b.age_months));
            if let Some(pair) = table
                .windows(2)
                .find(|pair| pair[0].age_months == pair[1].age_months)
            {
                return Err(GrowthError::DuplicateRow {
                    sex: pair[0].sex,
                    age_months: pair[0].age_months,
                });
            }
        }

        Ok(Self { male, female })
    }

    /// Parse a JSON array of [`LmsRow`]s.
    pub fn from_json(json: &str) -> Result<Self, GrowthError> {
        let rows: Vec<LmsRow> = serde_json::from_str(json)?;
        Self::new(rows)
    }

    pub fn from_path(path: &Path) -> Result<Self, GrowthError> {
        let contents = std::fs::read_to_string(path).map_err(|source| GrowthError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    fn rows(&self, sex: Sex) -> &[LmsRow] {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Youngest and oldest tabulated ages for `sex`.
    pub fn age_span(&self, sex: Sex) -> Option<(f64, f64)> {
        let rows = self.rows(sex);
        Some((rows.first()?.age_months, rows.last()?.age_months))
    }

    /// L, M and S at `age_months`, or `None` outside the tabulated span.
    pub fn lms_at(&self, sex: Sex, age_months: f64) -> Option<Lms> {
        let rows = self.rows(sex);
        let upper = rows.partition_point(|row| row.age_months < age_months);
        let hi = rows.get(upper)?;
        if hi.age_months == age_months {
            return Some(hi.into());
        }
        let lo = rows.get(upper.checked_sub(1)?)?;
        Some(Lms::lerp(lo, hi, age_months))
    }
}

/// BMI-for-age z-score backed by an [`LmsReference`].
#[derive(Debug, Clone)]
pub struct LmsZScore {
    reference: LmsReference,
}

impl LmsZScore {
    pub fn new(reference: LmsReference) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &LmsReference {
        &self.reference
    }

    pub fn compute(&self, weight_kg: f64, height_m: f64, sex: Sex, age_months: u32) -> Option<f64> {
        let bmi = body_mass_index(weight_kg, height_m);
        if !bmi.is_finite() || bmi <= 0.0 {
            return None;
        }
        let lms = self.reference.lms_at(sex, f64::from(age_months))?;
        let z = lms.z_score(bmi);
        z.is_finite().then_some(z)
    }
}
