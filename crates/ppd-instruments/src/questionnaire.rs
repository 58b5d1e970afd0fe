//! One-question-at-a-time walk through the EPDS.
//!
//! The cursor marks the active item: `c < 10` presents `Q{c+1}`, `c == 10`
//! means every item has been passed and the answers are ready to score.
//! Navigation moves the cursor by one step and is gated: forward needs an
//! answer on the active item, backward needs `c > 0`. A refused move is a
//! no-op, reported through [`Questionnaire::can_advance`] and
//! [`Questionnaire::can_retreat`] so callers can disable the action.

use serde::Serialize;
use ts_rs::TS;

use ppd_core::error::IncompleteInputError;
use ppd_core::models::score::EpdsScore;

use crate::Instrument;
use crate::error::InstrumentError;
use crate::instruments::epds::{EPDS, ITEM_COUNT};
use crate::scoring::{self, EpdsAnswers, Question, QuestionId};

/// Progress through the questionnaire, as shown by the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Progress {
    pub answered: u8,
    pub total: u8,
    pub percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Questionnaire {
    answers: EpdsAnswers,
    cursor: u8,
}

impl Questionnaire {
    pub const END: u8 = ITEM_COUNT as u8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> u8 {
        self.cursor
    }

    pub fn answers(&self) -> &EpdsAnswers {
        &self.answers
    }

    /// The item currently presented, or `None` once the cursor reaches the end.
    pub fn active_question(&self) -> Option<&'static Question> {
        let id = self.active_id()?;
        EPDS.question(id)
    }

    fn active_id(&self) -> Option<QuestionId> {
        if self.is_complete() {
            return None;
        }
        QuestionId::from_index(usize::from(self.cursor))
    }

    /// Record a choice for the active item. Overwrites any earlier choice.
    pub fn select_answer(&mut self, id: QuestionId, choice: &str) -> Result<(), InstrumentError> {
        let active = self.active_id();
        if active != Some(id) {
            return Err(InstrumentError::NotActiveQuestion {
                requested: id,
                active: active.map_or_else(|| "none".to_string(), |a| a.to_string()),
            });
        }
        if EPDS.score_choice(id, choice).is_none() {
            return Err(InstrumentError::UnknownChoice {
                question: id,
                choice: choice.to_string(),
            });
        }

        self.answers.set(id, choice);
        tracing::debug!(question = %id, "answer selected");
        Ok(())
    }

    pub fn can_advance(&self) -> bool {
        self.active_id().is_some_and(|id| {
            self.answers
                .get(id)
                .is_some_and(|choice| EPDS.score_choice(id, choice).is_some())
        })
    }

    /// Move to the next item. Returns `false` (and does nothing) when refused.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.cursor = (self.cursor + 1).min(Self::END);
        true
    }

    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    /// Move back one item, keeping every answer. Returns `false` at the first item.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == Self::END
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.cursor,
            total: Self::END,
            percent: (u16::from(self.cursor) * 100 / u16::from(Self::END)) as u8,
        }
    }

    /// Items not yet passed: the active one and everything after it.
    pub fn remaining(&self) -> Vec<QuestionId> {
        QuestionId::all().skip(usize::from(self.cursor)).collect()
    }

    pub fn item_scores(&self) -> Result<[u8; ITEM_COUNT], IncompleteInputError> {
        scoring::item_scores(&self.answers)
    }

    pub fn compute_score(&self) -> Result<EpdsScore, IncompleteInputError> {
        scoring::score(&self.answers)
    }

    /// Clear every answer and return to the first item.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.cursor = 0;
    }
}
