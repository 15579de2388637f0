//! The three external models the engine calls out to.
//!
//! All of them are pure functions of their inputs. The engine only passes
//! canonical units: kilograms, meters, whole months.

use metscalc_core::models::demographics::Sex;
use metscalc_core::models::params::RiskParams;
use metscalc_core::models::result::ResultRecord;
use metscalc_growth::bmi::StandardBmi;
use metscalc_growth::lms::LmsZScore;

pub trait AdultBmi: Send + Sync {
    fn adult_bmi(&self, weight_kg: f64, height_m: f64) -> f64;
}

pub trait PediatricBmiZScore: Send + Sync {
    /// `None` when the subject falls outside what the model covers.
    fn bmi_z_score(
        &self,
        weight_kg: f64,
        height_m: f64,
        sex: Sex,
        age_months: u32,
    ) -> Option<f64>;
}

pub trait RiskScore: Send + Sync {
    fn risk_score(&self, params: &RiskParams) -> ResultRecord;
}

impl<F> RiskScore for F
where
    F: Fn(&RiskParams) -> ResultRecord + Send + Sync,
{
    fn risk_score(&self, params: &RiskParams) -> ResultRecord {
        self(params)
    }
}

impl AdultBmi for StandardBmi {
    fn adult_bmi(&self, weight_kg: f64, height_m: f64) -> f64 {
        self.compute(weight_kg, height_m)
    }
}

impl PediatricBmiZScore for LmsZScore {
    fn bmi_z_score(
        &self,
        weight_kg: f64,
        height_m: f64,
        sex: Sex,
        age_months: u32,
    ) -> Option<f64> {
        self.compute(weight_kg, height_m, sex, age_months)
    }
}

/// Stand-in when no growth reference has been loaded: never scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrowthReference;

impl PediatricBmiZScore for NoGrowthReference {
    fn bmi_z_score(&self, _: f64, _: f64, _: Sex, _: u32) -> Option<f64> {
        None
    }
}

/// The set of models a [`Calculator`](crate::Calculator) is wired to.
pub struct Collaborators {
    pub adult_bmi: Box<dyn AdultBmi>,
    pub bmi_z_score: Box<dyn PediatricBmiZScore>,
    pub risk_score: Box<dyn RiskScore>,
}

impl Collaborators {
    /// Standard adult BMI, no growth reference.
    pub fn new(risk_score: impl RiskScore + 'static) -> Self {
        Self {
            adult_bmi: Box::new(StandardBmi),
            bmi_z_score: Box::new(NoGrowthReference),
            risk_score: Box::new(risk_score),
        }
    }

    pub fn with_adult_bmi(mut self, adult_bmi: impl AdultBmi + 'static) -> Self {
        self.adult_bmi = Box::new(adult_bmi);
        self
    }

    pub fn with_bmi_z_score(mut self, bmi_z_score: impl PediatricBmiZScore + 'static) -> Self {
        self.bmi_z_score = Box::new(bmi_z_score);
        self
    }
}
