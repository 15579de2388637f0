use metscalc_core::models::derived::DerivedFields;
use metscalc_core::models::inputs::RawInputs;
use metscalc_core::models::result::ResultRecord;
use tracing::info;

use crate::change::RawChange;
use crate::collaborators::Collaborators;
use crate::config::CalculatorConfig;
use crate::derive::derive_fields;
use crate::error::EngineError;
use crate::submit::{RequiredInput, assemble_params, missing_inputs};

/// One calculator session: the entered inputs, the values derived from them
/// and the most recent score.
///
/// Every mutation runs to completion before returning, and derived fields are
/// replaced as a whole, so a caller never observes a half-updated record.
pub struct Calculator {
    raw: RawInputs,
    derived: DerivedFields,
    result: Option<ResultRecord>,
    config: CalculatorConfig,
    collaborators: Collaborators,
}

impl Calculator {
    /// A blank session with the appointment set to today.
    pub fn new(collaborators: Collaborators, config: CalculatorConfig) -> Self {
        Self::with_inputs(RawInputs::default(), collaborators, config)
    }

    pub fn with_inputs(
        raw: RawInputs,
        collaborators: Collaborators,
        config: CalculatorConfig,
    ) -> Self {
        let derived = derive_fields(&raw, &collaborators, &config);
        Self {
            raw,
            derived,
            result: None,
            config,
            collaborators,
        }
    }

    pub fn raw(&self) -> &RawInputs {
        &self.raw
    }

    pub fn derived(&self) -> &DerivedFields {
        &self.derived
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        self.result.as_ref()
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn apply_raw_change(&mut self, change: RawChange) -> &DerivedFields {
        change.apply(&mut self.raw);
        self.recompute()
    }

    /// Apply an edit reported as control name and text. A rejected edit
    /// leaves the session untouched.
    pub fn apply_text_change(
        &mut self,
        field: &str,
        text: &str,
    ) -> Result<&DerivedFields, EngineError> {
        let change = RawChange::parse(field, text)?;
        Ok(self.apply_raw_change(change))
    }

    pub fn recompute(&mut self) -> &DerivedFields {
        self.derived = derive_fields(&self.raw, &self.collaborators, &self.config);
        &self.derived
    }

    pub fn missing_for_submission(&self) -> Vec<RequiredInput> {
        missing_inputs(&self.raw, &self.derived)
    }

    pub fn can_submit(&self) -> bool {
        self.missing_for_submission().is_empty()
    }

    /// Score the current inputs. The new result replaces any previous one;
    /// on error the previous result is kept and the model is not called.
    pub fn submit(&mut self) -> Result<&ResultRecord, EngineError> {
        let params = assemble_params(&self.raw, &self.derived, &self.config)?;
        let result = self.collaborators.risk_score.risk_score(&params);
        info!(
            age = ?params.age,
            adolescent = self.derived.is_adolescent,
            has_bmi_score = result.score_by_bmi.is_some(),
            has_waist_score = result.score_by_waist.is_some(),
            "risk score calculated"
        );
        Ok(&*self.result.insert(result))
    }

    /// Discard the current result. Inputs and derived fields are kept.
    pub fn reset(&mut self) {
        self.result = None;
    }
}
