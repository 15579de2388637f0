mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{SCORE, date, enter_labs, harness, harness_with};
use metscalc_core::models::demographics::{RaceEthnicity, Sex};
use metscalc_core::models::inputs::RawInputs;
use metscalc_core::models::params::RiskParams;
use metscalc_core::models::result::ResultRecord;
use metscalc_core::units::LengthUnit;
use metscalc_engine::Calculator;
use metscalc_engine::change::RawChange;
use metscalc_engine::collaborators::Collaborators;
use metscalc_engine::config::{CalculatorConfig, DEFAULT_UNKNOWN_AGE, UnknownAgePolicy};
use metscalc_engine::error::EngineError;
use metscalc_engine::submit::RequiredInput;

#[test]
fn nothing_entered_lists_every_requirement() {
    let h = harness();
    assert!(!h.calculator.can_submit());
    assert_eq!(
        h.calculator.missing_for_submission(),
        vec![
            RequiredInput::Sex,
            RequiredInput::RaceEthnicity,
            RequiredInput::SystolicBp,
            RequiredInput::FastingGlucose,
            RequiredInput::Triglyceride,
            RequiredInput::Hdl,
            RequiredInput::BodySize,
        ]
    );
}

#[test]
fn missing_sex_is_rejected_without_calling_the_model() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Weight(Some(70.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(175.0)));
    h.calculator.apply_raw_change(RawChange::Sex(None));

    let err = h.calculator.submit().unwrap_err();
    match err {
        EngineError::IncompleteInputs { missing } => {
            assert_eq!(missing, vec![RequiredInput::Sex]);
        }
        other => panic!("expected IncompleteInputs, got {other:?}"),
    }
    assert!(h.risk_calls.lock().unwrap().is_empty());
    assert!(h.calculator.result().is_none());
}

#[test]
fn adult_without_birth_date_is_scored_at_the_default_age() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Weight(Some(80.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(200.0)));
    h.calculator.apply_raw_change(RawChange::Waist(Some(35.0)));
    h.calculator.apply_raw_change(RawChange::WaistUnit(LengthUnit::Inches));

    let result = *h.calculator.submit().unwrap();
    assert_eq!(result, SCORE);

    let calls = h.risk_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let params = calls[0];
    assert_eq!(params.age, Some(DEFAULT_UNKNOWN_AGE));
    assert_eq!(params.sex, Sex::Female);
    assert_eq!(params.race, RaceEthnicity::Hispanic);
    assert_eq!(params.bmi, Some(20.0));
    assert_eq!(params.bmi_z_score, None);
    assert_eq!(params.sbp, 118.0);
    assert_eq!(params.glucose, 92.0);
    assert_eq!(params.triglyceride, 140.0);
    assert_eq!(params.hdl, 45.0);
    assert!((params.waist.unwrap() - 88.9).abs() < 1e-9);
}

#[test]
fn waist_alone_is_enough_for_adults() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator
        .apply_raw_change(RawChange::BirthDate(Some(date("1980-05-20"))));
    h.calculator.apply_raw_change(RawChange::Waist(Some(0.9)));
    h.calculator
        .apply_raw_change(RawChange::WaistUnit(LengthUnit::Meters));
    assert!(h.calculator.can_submit());

    h.calculator.submit().unwrap();
    let params = h.risk_calls.lock().unwrap()[0];
    assert_eq!(params.age, Some(43));
    assert_eq!(params.bmi, None);
    assert!((params.waist.unwrap() - 90.0).abs() < 1e-9);
}

#[test]
fn adolescents_are_scored_without_waist() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator
        .apply_raw_change(RawChange::BirthDate(Some(date("2010-01-01"))));
    h.calculator.apply_raw_change(RawChange::Waist(Some(70.0)));
    assert_eq!(
        h.calculator.missing_for_submission(),
        vec![RequiredInput::BodySize]
    );

    h.calculator.apply_raw_change(RawChange::Weight(Some(50.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(160.0)));
    h.calculator.submit().unwrap();

    let params = h.risk_calls.lock().unwrap()[0];
    assert_eq!(params.age, Some(14));
    assert_eq!(params.waist, None);
    assert_eq!(params.bmi_z_score, Some(1.25));
    assert!(params.bmi.is_some());
}

#[test]
fn pass_through_policy_sends_no_age() {
    let config = CalculatorConfig {
        unknown_age: UnknownAgePolicy::PassThrough,
        ..CalculatorConfig::default()
    };
    let mut h = harness_with(config);
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Waist(Some(92.0)));
    h.calculator.submit().unwrap();

    assert_eq!(h.risk_calls.lock().unwrap()[0].age, None);
}

#[test]
fn reset_keeps_inputs_and_derived_fields() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator
        .apply_raw_change(RawChange::BirthDate(Some(date("1990-03-03"))));
    h.calculator.apply_raw_change(RawChange::Weight(Some(70.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(175.0)));

    let raw_before = h.calculator.raw().clone();
    let derived_before = *h.calculator.derived();

    h.calculator.submit().unwrap();
    assert!(h.calculator.result().is_some());

    h.calculator.reset();
    assert!(h.calculator.result().is_none());
    assert_eq!(h.calculator.raw(), &raw_before);
    assert_eq!(h.calculator.derived(), &derived_before);
}

/// A session whose model answers with both scores first and only the BMI
/// score afterwards.
fn alternating_scores() -> (Calculator, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let collaborators = Collaborators::new(move |_: &RiskParams| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            SCORE
        } else {
            ResultRecord {
                score_by_bmi: Some(0.3),
                score_by_waist: None,
            }
        }
    });
    let calculator = Calculator::with_inputs(
        RawInputs::on(date("2024-01-01")),
        collaborators,
        CalculatorConfig::default(),
    );
    (calculator, calls)
}

#[test]
fn new_submission_replaces_the_previous_result() {
    let (mut calculator, calls) = alternating_scores();
    enter_labs(&mut calculator);
    calculator.apply_raw_change(RawChange::Waist(Some(92.0)));
    assert_eq!(calculator.submit().unwrap(), &SCORE);

    calculator.apply_raw_change(RawChange::Hdl(Some(60.0)));
    calculator.submit().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let result = calculator.result().unwrap();
    assert_eq!(result.score_by_bmi, Some(0.3));
    assert_eq!(result.score_by_waist, None);
}

#[test]
fn rejected_submission_keeps_the_previous_result() {
    let (mut calculator, calls) = alternating_scores();
    enter_labs(&mut calculator);
    calculator.apply_raw_change(RawChange::Waist(Some(92.0)));
    calculator.submit().unwrap();

    calculator.apply_raw_change(RawChange::Hdl(None));
    assert!(calculator.submit().is_err());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(calculator.result(), Some(&SCORE));
}

#[test]
fn unconvertible_weight_does_not_count_as_body_size() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Weight(Some(-70.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(175.0)));
    assert_eq!(h.calculator.derived().bmi_adult, None);

    match h.calculator.submit().unwrap_err() {
        EngineError::IncompleteInputs { missing } => {
            assert_eq!(missing, vec![RequiredInput::BodySize]);
        }
        other => panic!("expected IncompleteInputs, got {other:?}"),
    }
    assert!(h.risk_calls.lock().unwrap().is_empty());
}

#[test]
fn zero_height_does_not_count_as_body_size() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Weight(Some(70.0)));
    h.calculator.apply_raw_change(RawChange::Height(Some(0.0)));
    assert_eq!(
        h.calculator.missing_for_submission(),
        vec![RequiredInput::BodySize]
    );
}

#[test]
fn labs_that_are_not_finite_or_are_negative_count_as_missing() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Waist(Some(90.0)));
    h.calculator.apply_raw_change(RawChange::Hdl(Some(f64::NAN)));
    h.calculator
        .apply_raw_change(RawChange::SystolicBp(Some(-118.0)));
    h.calculator
        .apply_raw_change(RawChange::Triglyceride(Some(f64::INFINITY)));

    match h.calculator.submit().unwrap_err() {
        EngineError::IncompleteInputs { missing } => assert_eq!(
            missing,
            vec![
                RequiredInput::SystolicBp,
                RequiredInput::Triglyceride,
                RequiredInput::Hdl,
            ]
        ),
        other => panic!("expected IncompleteInputs, got {other:?}"),
    }
    assert!(h.risk_calls.lock().unwrap().is_empty());
}

#[test]
fn incomplete_inputs_message_names_what_is_missing() {
    let mut h = harness();
    enter_labs(&mut h.calculator);
    h.calculator.apply_raw_change(RawChange::Hdl(None));
    let err = h.calculator.submit().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot calculate yet; missing HDL, weight and height, or waist circumference"
    );
}
