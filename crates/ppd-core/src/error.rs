use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unrecognized risk label: {0}")]
    UnrecognizedLabel(String),

    #[error("age {0} is outside range [18, 45]")]
    AgeOutOfRange(u8),

    #[error("invalid value '{value}' for {field}")]
    InvalidChoice { field: &'static str, value: String },
}

/// Raised when the questionnaire or the demographics are not complete enough
/// to score or to request a prediction. Recoverable: the user stays in the
/// form and nothing is lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct IncompleteInputError {
    /// Names of the fields or questions still missing a valid value.
    pub missing: Vec<String>,
    pub message: String,
}

impl IncompleteInputError {
    pub fn questionnaire(missing: Vec<String>) -> Self {
        Self {
            missing,
            message: "Please complete the questionnaire before viewing your results.".to_string(),
        }
    }

    pub fn demographics(missing: Vec<String>) -> Self {
        Self {
            missing,
            message: "Please complete all demographic questions before proceeding.".to_string(),
        }
    }
}
