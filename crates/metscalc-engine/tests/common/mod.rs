#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use jiff::civil::Date;
use metscalc_core::models::demographics::Sex;
use metscalc_core::models::params::RiskParams;
use metscalc_core::models::result::ResultRecord;
use metscalc_engine::Calculator;
use metscalc_engine::collaborators::{Collaborators, PediatricBmiZScore};
use metscalc_engine::config::CalculatorConfig;

/// Returns a fixed z-score and remembers what it was asked.
pub struct FixedZScore {
    pub z: f64,
    pub calls: Arc<Mutex<Vec<(f64, f64, Sex, u32)>>>,
}

impl PediatricBmiZScore for FixedZScore {
    fn bmi_z_score(&self, weight_kg: f64, height_m: f64, sex: Sex, age_months: u32) -> Option<f64> {
        self.calls
            .lock()
            .unwrap()
            .push((weight_kg, height_m, sex, age_months));
        Some(self.z)
    }
}

pub struct Harness {
    pub calculator: Calculator,
    pub z_calls: Arc<Mutex<Vec<(f64, f64, Sex, u32)>>>,
    pub risk_calls: Arc<Mutex<Vec<RiskParams>>>,
}

pub const SCORE: ResultRecord = ResultRecord {
    score_by_bmi: Some(0.512),
    score_by_waist: Some(0.734),
};

pub fn harness_with(config: CalculatorConfig) -> Harness {
    let z_calls = Arc::new(Mutex::new(Vec::new()));
    let risk_calls = Arc::new(Mutex::new(Vec::new()));

    let recorded = Arc::clone(&risk_calls);
    let collaborators = Collaborators::new(move |params: &RiskParams| {
        recorded.lock().unwrap().push(*params);
        SCORE
    })
    .with_bmi_z_score(FixedZScore {
        z: 1.25,
        calls: Arc::clone(&z_calls),
    });

    let calculator = Calculator::with_inputs(
        metscalc_core::models::inputs::RawInputs::on(date("2024-01-01")),
        collaborators,
        config,
    );
    Harness {
        calculator,
        z_calls,
        risk_calls,
    }
}

pub fn harness() -> Harness {
    harness_with(CalculatorConfig::default())
}

pub fn date(text: &str) -> Date {
    text.parse().unwrap()
}

/// Fill in every lab and demographic input through text edits.
pub fn enter_labs(calculator: &mut Calculator) {
    for (field, text) in [
        ("sex", "female"),
        ("race", "hispanic"),
        ("sbp", "118"),
        ("glucose", "92"),
        ("triglyceride", "140"),
        ("hdl", "45"),
    ] {
        calculator.apply_text_change(field, text).unwrap();
    }
}
