use thiserror::Error;

use ppd_core::error::IncompleteInputError;

use crate::scoring::QuestionId;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("{requested} is not the active question (active: {active})")]
    NotActiveQuestion { requested: QuestionId, active: String },

    #[error("'{choice}' is not an option for {question}")]
    UnknownChoice { question: QuestionId, choice: String },

    #[error(transparent)]
    Incomplete(#[from] IncompleteInputError),
}
