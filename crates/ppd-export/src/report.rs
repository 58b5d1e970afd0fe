use serde::Serialize;

use ppd_core::models::demographics::YesNo;
use ppd_core::models::score::EpdsScore;
use ppd_instruments::Instrument;
use ppd_instruments::instruments::epds::EPDS;
use ppd_instruments::scoring::QuestionId;
use ppd_instruments::session::ScreeningSession;

use crate::chart::RiskChart;
use crate::error::ExportError;

pub const NEXT_STEPS_INTRO: &str =
    "Regardless of your predicted risk level, remember that seeking support is a sign of strength.";

pub const NEXT_STEPS: [NextStep; 3] = [
    NextStep {
        heading: "Talk to someone",
        text: "Share your feelings with a partner, friend, family member, or healthcare provider.",
    },
    NextStep {
        heading: "Self-care",
        text: "Prioritize sleep, nutrition, and gentle exercise. Even small steps help.",
    },
    NextStep {
        heading: "Professional help",
        text: "If you're struggling, consult a doctor or a mental health specialist (e.g., therapist, psychiatrist). They can offer diagnosis and personalized treatment plans.",
    },
];

pub const NEXT_STEPS_OUTRO: &str = "You can always revisit the questionnaire or start over.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextStep {
    pub heading: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRow {
    pub question: String,
    pub prompt: String,
    pub choice: String,
    pub score: u8,
}

/// Everything the results page shows, flattened for the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub session_id: String,
    pub predicted_at: String,
    pub demographics: Vec<SummaryRow>,
    pub answers: Vec<AnswerRow>,
    pub epds_score: u8,
    pub max_score: u8,
    pub label: &'static str,
    pub color: &'static str,
    pub message: &'static str,
    pub chart: RiskChart,
    pub next_steps_intro: &'static str,
    pub next_steps: Vec<NextStep>,
    pub next_steps_outro: &'static str,
}

fn yes_no(value: Option<YesNo>) -> String {
    value.map_or("Not answered", |v| v.as_str()).to_string()
}

impl ResultReport {
    /// Build the report for a session that has been scored. Answers are taken
    /// from the features the model actually saw.
    pub fn from_session(session: &ScreeningSession) -> Result<Self, ExportError> {
        let outcome = session.outcome.as_ref().ok_or(ExportError::NoOutcome)?;
        let features = &outcome.features;
        let presentation = outcome.presentation();

        let demographics = vec![
            SummaryRow {
                label: "Age",
                value: features.age.to_string(),
            },
            SummaryRow {
                label: "Currently pregnant",
                value: yes_no(session.demographics.is_pregnant),
            },
            SummaryRow {
                label: "Given birth recently",
                value: yes_no(session.demographics.recent_birth),
            },
            SummaryRow {
                label: "Family support",
                value: features.family_support.to_string(),
            },
        ];

        let answers = features
            .items()
            .into_iter()
            .enumerate()
            .filter_map(|(index, code)| {
                let id = QuestionId::from_index(index)?;
                let question = EPDS.question(id)?;
                Some(AnswerRow {
                    question: id.to_string(),
                    prompt: question.prompt.clone(),
                    choice: EPDS.choice_for_code(id, code).unwrap_or_default().to_string(),
                    score: code,
                })
            })
            .collect();

        Ok(Self {
            session_id: outcome.session_id.to_string(),
            predicted_at: outcome.predicted_at.to_string(),
            demographics,
            answers,
            epds_score: outcome.epds_score.value(),
            max_score: EpdsScore::MAX,
            label: outcome.prediction.label.as_str(),
            color: presentation.color,
            message: presentation.message,
            chart: RiskChart::for_label(outcome.prediction.label),
            next_steps_intro: NEXT_STEPS_INTRO,
            next_steps: NEXT_STEPS.to_vec(),
            next_steps_outro: NEXT_STEPS_OUTRO,
        })
    }
}
