//! ppd-instruments
//!
//! Screening instrument definitions and the logic that walks a user through
//! them. Pure data and state, no I/O. Defines the EPDS answer key, its
//! scoring rule, the one-question-at-a-time questionnaire, and the
//! per-user screening session that ties it to the demographics.

pub mod error;
pub mod instruments;
pub mod questionnaire;
pub mod scoring;
pub mod session;

use scoring::{Question, QuestionId};

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "epds").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Edinburgh Postnatal Depression Scale").
    fn name(&self) -> &str;

    /// Recall window or other instructions shown above the questions.
    fn instructions(&self) -> &str;

    /// Questions in presentation order.
    fn questions(&self) -> &[Question];

    fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions().iter().find(|q| q.id == id)
    }

    /// Score for a choice, or `None` if the text is not one of the question's options.
    fn score_choice(&self, id: QuestionId, choice: &str) -> Option<u8> {
        self.question(id)?
            .choices
            .iter()
            .find(|c| c.text == choice)
            .map(|c| c.score)
    }

    /// Highest total the instrument can produce.
    fn max_total(&self) -> u32 {
        self.questions()
            .iter()
            .map(|q| q.choices.iter().map(|c| u32::from(c.score)).max().unwrap_or(0))
            .sum()
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::epds::Epds)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
