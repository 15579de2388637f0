use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Severity scores returned by the risk-score model. Either variant may be
/// absent when the model lacked the inputs for it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultRecord {
    pub score_by_bmi: Option<f64>,
    pub score_by_waist: Option<f64>,
}

impl ResultRecord {
    pub fn is_empty(&self) -> bool {
        self.score_by_bmi.is_none() && self.score_by_waist.is_none()
    }
}
