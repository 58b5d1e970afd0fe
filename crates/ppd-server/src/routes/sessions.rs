use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ppd_core::error::CoreError;
use ppd_core::models::demographics::{Age, Demographics};
use ppd_core::models::score::EpdsScore;
use ppd_instruments::instruments::epds::ITEM_COUNT;
use ppd_instruments::scoring::QuestionId;
use ppd_instruments::session::{ScreeningSession, SessionView};

use crate::audit::AuditEvent;
use crate::error::ApiError;
use crate::state::{AppState, session_mut};

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let session = ScreeningSession::new();
    let view = session.view();
    state.sessions.lock().await.insert(session.id, session);

    tracing::info!(session_id = %view.id, "session created");
    (StatusCode::CREATED, Json(view))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::session_not_found(id))?;
    Ok(Json(session.view()))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .lock()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::session_not_found(id))?;

    AuditEvent::new("delete", "session", id.to_string()).emit();
    Ok(StatusCode::NO_CONTENT)
}

/// Full replacement of the demographic answers. An omitted or `null` field
/// is left unselected.
#[derive(Debug, Deserialize)]
pub struct DemographicsUpdate {
    /// Parsed wide; the range is checked against [`Age`].
    #[serde(default = "default_age")]
    pub age: u16,
    pub is_pregnant: Option<String>,
    pub recent_birth: Option<String>,
    pub family_support: Option<String>,
}

fn default_age() -> u16 {
    u16::from(Age::DEFAULT)
}

impl TryFrom<DemographicsUpdate> for Demographics {
    type Error = CoreError;

    fn try_from(update: DemographicsUpdate) -> Result<Self, Self::Error> {
        let years = u8::try_from(update.age).map_err(|_| CoreError::InvalidChoice {
            field: "age",
            value: update.age.to_string(),
        })?;
        Ok(Demographics {
            age: Age::new(years)?,
            is_pregnant: update.is_pregnant.as_deref().map(str::parse).transpose()?,
            recent_birth: update.recent_birth.as_deref().map(str::parse).transpose()?,
            family_support: update.family_support.as_deref().map(str::parse).transpose()?,
        })
    }
}

pub async fn put_demographics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<DemographicsUpdate>, JsonRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let Json(update) = payload?;
    let demographics = Demographics::try_from(update)?;

    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;
    session.set_demographics(demographics);
    Ok(Json(session.view()))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub choice: String,
}

pub async fn put_answer(
    State(state): State<AppState>,
    Path((id, question_id)): Path<(Uuid, String)>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<SessionView>, ApiError> {
    let Json(req) = payload?;
    let question: QuestionId = question_id.parse()?;

    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;
    session.select_answer(question, &req.choice)?;
    Ok(Json(session.view()))
}

/// A refused move leaves the session as it was; the view's `can_advance`
/// and `can_retreat` flags tell the client why nothing changed.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;
    if !session.advance() {
        tracing::debug!(session_id = %id, "advance refused");
    }
    Ok(Json(session.view()))
}

pub async fn retreat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;
    if !session.retreat() {
        tracing::debug!(session_id = %id, "retreat refused");
    }
    Ok(Json(session.view()))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let mut sessions = state.sessions.lock().await;
    let session = session_mut(&mut sessions, id)?;
    session.reset();

    AuditEvent::new("reset", "session", id.to_string()).emit();
    Ok(Json(session.view()))
}

#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub epds_score: u8,
    pub max_score: u8,
    pub item_scores: [u8; ITEM_COUNT],
}

pub async fn get_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScoreView>, ApiError> {
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&id).ok_or_else(|| ApiError::session_not_found(id))?;

    let item_scores = session.questionnaire.item_scores()?;
    let score = session.questionnaire.compute_score()?;
    Ok(Json(ScoreView {
        epds_score: score.value(),
        max_score: EpdsScore::MAX,
        item_scores,
    }))
}
