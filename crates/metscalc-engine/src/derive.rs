//! Recomputation of [`DerivedFields`] from [`RawInputs`].
//!
//! [`derive_fields`] is total: missing or unconvertible inputs leave the
//! dependent field empty instead of failing, and every field that does not
//! apply to the current branch is reset.

use jiff::Unit;
use jiff::civil::Date;
use metscalc_core::models::derived::DerivedFields;
use metscalc_core::models::inputs::RawInputs;
use tracing::{debug, warn};

use crate::collaborators::Collaborators;
use crate::config::CalculatorConfig;

/// Whole years from `birth` to `appointment`; `None` if the appointment
/// precedes the birth date.
pub fn age_in_years(birth: Date, appointment: Date) -> Option<u16> {
    if appointment < birth {
        return None;
    }
    let span = birth.until((Unit::Year, appointment)).ok()?;
    u16::try_from(span.get_years()).ok()
}

/// Whole months from `birth` to `appointment`; `None` if the appointment
/// precedes the birth date.
pub fn age_in_months(birth: Date, appointment: Date) -> Option<u32> {
    if appointment < birth {
        return None;
    }
    let span = birth.until((Unit::Month, appointment)).ok()?;
    u32::try_from(span.get_months()).ok()
}

pub fn derive_fields(
    raw: &RawInputs,
    collaborators: &Collaborators,
    config: &CalculatorConfig,
) -> DerivedFields {
    let dates = raw.birth_date.zip(raw.appointment_date);
    let age_years = dates.and_then(|(birth, appointment)| {
        let age = age_in_years(birth, appointment);
        if age.is_none() {
            warn!(%birth, %appointment, "birth date is after the appointment date");
        }
        age
    });
    let is_adolescent = age_years.is_some_and(|age| age < config.adult_age_years);

    let mut derived = DerivedFields {
        age_years,
        is_adolescent,
        bmi_adult: None,
        bmi_z_score: None,
    };

    let (Some(weight), Some(height)) = (raw.weight.kilograms(), raw.height.meters()) else {
        debug!(age_years = ?age_years, is_adolescent, "recomputed without body size");
        return derived;
    };
    let (weight_kg, height_m) = match (weight, height) {
        (Ok(weight_kg), Ok(height_m)) => (weight_kg, height_m),
        (weight, height) => {
            for err in [weight.err(), height.err()].into_iter().flatten() {
                debug!(%err, "body size not computable");
            }
            return derived;
        }
    };

    derived.bmi_adult = finite(collaborators.adult_bmi.adult_bmi(weight_kg, height_m));

    if is_adolescent
        && let Some(sex) = raw.sex
        && let Some((birth, appointment)) = dates
        && let Some(age_months) = age_in_months(birth, appointment)
    {
        derived.bmi_z_score = collaborators
            .bmi_z_score
            .bmi_z_score(weight_kg, height_m, sex, age_months)
            .and_then(finite);
    }

    debug!(
        age_years = ?derived.age_years,
        is_adolescent,
        bmi_adult = ?derived.bmi_adult,
        bmi_z_score = ?derived.bmi_z_score,
        "recomputed derived fields"
    );
    derived
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
