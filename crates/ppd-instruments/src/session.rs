use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use ppd_core::error::IncompleteInputError;
use ppd_core::models::demographics::Demographics;
use ppd_core::models::features::FeatureRecord;
use ppd_core::models::outcome::{PredictionResult, ScreeningOutcome};
use ppd_core::models::score::EpdsScore;

use crate::error::InstrumentError;
use crate::questionnaire::{Progress, Questionnaire};
use crate::scoring::{Question, QuestionId};

/// Everything one user has entered so far. Owned by exactly one user; passed
/// explicitly into every operation.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningSession {
    pub id: Uuid,
    pub demographics: Demographics,
    pub questionnaire: Questionnaire,
    pub outcome: Option<ScreeningOutcome>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreeningSession {
    pub fn new() -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            demographics: Demographics::default(),
            questionnaire: Questionnaire::new(),
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = jiff::Timestamp::now();
    }

    /// Replace the demographic answers. Any earlier outcome no longer
    /// describes the session and is dropped.
    pub fn set_demographics(&mut self, demographics: Demographics) {
        self.demographics = demographics;
        self.outcome = None;
        self.touch();
    }

    pub fn select_answer(&mut self, id: QuestionId, choice: &str) -> Result<(), InstrumentError> {
        self.questionnaire.select_answer(id, choice)?;
        self.outcome = None;
        self.touch();
        Ok(())
    }

    pub fn advance(&mut self) -> bool {
        self.touch();
        self.questionnaire.advance()
    }

    pub fn retreat(&mut self) -> bool {
        self.touch();
        self.questionnaire.retreat()
    }

    /// Start over: clear answers and cursor, and restore default demographics.
    pub fn reset(&mut self) {
        self.questionnaire.reset();
        self.demographics = Demographics::default();
        self.outcome = None;
        self.touch();
    }

    /// Blocking warnings to show above the form.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.demographics.is_valid() {
            warnings.push(IncompleteInputError::demographics(Vec::new()).message);
        }
        warnings
    }

    /// The gate in front of a prediction: demographics valid and the
    /// questionnaire walked to the end with all ten answers recognised.
    /// Returns the record for the predictor along with the total score, or
    /// every field still missing.
    pub fn feature_record(&self) -> Result<(FeatureRecord, EpdsScore), IncompleteInputError> {
        let support = self.demographics.require_valid();
        let items = if self.questionnaire.is_complete() {
            self.questionnaire.item_scores()
        } else {
            let remaining = self.questionnaire.remaining();
            Err(IncompleteInputError::questionnaire(
                remaining.iter().map(ToString::to_string).collect(),
            ))
        };

        match (support, items) {
            (Ok(support), Ok(items)) => {
                let score = self.questionnaire.compute_score()?;
                let record = FeatureRecord::new(self.demographics.age, support, items, score);
                Ok((record, score))
            }
            (Err(demographics), Ok(_)) => Err(demographics),
            (Ok(_), Err(answers)) => Err(answers),
            (Err(demographics), Err(answers)) => {
                let mut missing = demographics.missing;
                missing.extend(answers.missing);
                Err(IncompleteInputError {
                    missing,
                    message: answers.message,
                })
            }
        }
    }

    pub fn record_outcome(
        &mut self,
        features: FeatureRecord,
        epds_score: EpdsScore,
        prediction: PredictionResult,
    ) -> &ScreeningOutcome {
        self.touch();
        self.outcome.insert(ScreeningOutcome {
            session_id: self.id,
            features,
            epds_score,
            prediction,
            predicted_at: self.updated_at,
        })
    }

    /// True when the session has not been touched for longer than `ttl`.
    pub fn is_idle(&self, now: jiff::Timestamp, ttl: std::time::Duration) -> bool {
        let Ok(ttl) = jiff::SignedDuration::try_from(ttl) else {
            return false;
        };
        now.duration_since(self.updated_at) > ttl
    }
}

/// What a client needs to draw the current step of the screening.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub id: Uuid,
    pub demographics: Demographics,
    pub demographics_valid: bool,
    pub cursor: u8,
    pub active_question: Option<Question>,
    /// The choice already recorded for the active question, if any.
    pub selected_answer: Option<String>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub is_complete: bool,
    pub progress: Progress,
    pub warnings: Vec<String>,
    pub outcome: Option<ScreeningOutcome>,
}

impl ScreeningSession {
    pub fn view(&self) -> SessionView {
        let active_question = self.questionnaire.active_question();
        let selected_answer = active_question
            .and_then(|q| self.questionnaire.answers().get(q.id))
            .map(str::to_string);

        SessionView {
            id: self.id,
            demographics: self.demographics,
            demographics_valid: self.demographics.is_valid(),
            cursor: self.questionnaire.cursor(),
            active_question: active_question.cloned(),
            selected_answer,
            can_advance: self.questionnaire.can_advance(),
            can_retreat: self.questionnaire.can_retreat(),
            is_complete: self.questionnaire.is_complete(),
            progress: self.questionnaire.progress(),
            warnings: self.warnings(),
            outcome: self.outcome.clone(),
        }
    }
}
