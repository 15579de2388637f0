/// Adult body-mass index: weight (kg) over height (m) squared.
///
/// Zero height yields a non-finite value; callers decide what that means.
pub fn body_mass_index(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// The standard adult BMI formula as a collaborator value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardBmi;

impl StandardBmi {
    pub fn compute(&self, weight_kg: f64, height_m: f64) -> f64 {
        body_mass_index(weight_kg, height_m)
    }
}
