use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use ppd_core::models::outcome::ScreeningOutcome;
use ppd_core::models::risk::RiskLabel;
use ppd_core::models::score::EpdsScore;

use crate::audit::AuditEvent;
use crate::error::ApiError;
use crate::state::{AppState, session_mut};

/// Label, colour, guidance and score, plus the encoded value for the chart.
#[derive(Debug, Serialize)]
pub struct PredictionView {
    pub session_id: Uuid,
    pub label: RiskLabel,
    pub color: &'static str,
    pub message: &'static str,
    pub epds_score: u8,
    pub max_score: u8,
    pub encoded_value: u8,
    pub probability: Option<f64>,
    pub predicted_at: jiff::Timestamp,
}

impl From<&ScreeningOutcome> for PredictionView {
    fn from(outcome: &ScreeningOutcome) -> Self {
        let presentation = outcome.presentation();
        Self {
            session_id: outcome.session_id,
            label: outcome.prediction.label,
            color: presentation.color,
            message: presentation.message,
            epds_score: outcome.epds_score.value(),
            max_score: EpdsScore::MAX,
            encoded_value: outcome.prediction.encoded_value,
            probability: outcome.prediction.probability,
            predicted_at: outcome.predicted_at,
        }
    }
}

/// Gate on complete input, run the model and keep the outcome on the session.
pub async fn predict(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PredictionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;

    let (features, score) = session.feature_record()?;
    let prediction = state.predictor.classify(&features)?;
    let outcome = session.record_outcome(features, score, prediction);

    AuditEvent::new("predict", "session", id.to_string())
        .with_details(serde_json::json!({ "encoded_value": outcome.prediction.encoded_value }))
        .emit();

    Ok(Json(PredictionView::from(outcome)))
}

/// The most recent outcome, if the session has been scored.
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PredictionView>, ApiError> {
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::session_not_found(id))?;
    let outcome = session
        .outcome
        .as_ref()
        .ok_or_else(|| ApiError::NotFound(format!("no prediction for session {id}")))?;
    Ok(Json(PredictionView::from(outcome)))
}
