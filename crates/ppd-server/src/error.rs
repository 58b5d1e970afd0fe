use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use ppd_core::error::{CoreError, IncompleteInputError};
use ppd_export::error::ExportError;
use ppd_instruments::error::InstrumentError;
use ppd_predictor::error::PredictorError;

/// Shown when the risk model produces something we cannot present.
pub const PREDICTION_FAILED_MESSAGE: &str =
    "We could not determine a risk level from your answers. Please try again later.";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Incomplete(IncompleteInputError),
    PredictionFailed(String),
    Internal(String),
}

impl ApiError {
    pub fn session_not_found(id: Uuid) -> Self {
        ApiError::NotFound(format!("session not found: {id}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, missing) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Incomplete(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.message, Some(e.missing)),
            ApiError::PredictionFailed(detail) => {
                tracing::error!("prediction failed: {detail}");
                (StatusCode::BAD_GATEWAY, PREDICTION_FAILED_MESSAGE.to_string(), None)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { error: message, missing })).into_response()
    }
}

impl From<IncompleteInputError> for ApiError {
    fn from(e: IncompleteInputError) -> Self {
        ApiError::Incomplete(e)
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnrecognizedLabel(_) => ApiError::PredictionFailed(e.to_string()),
            CoreError::AgeOutOfRange(_) | CoreError::InvalidChoice { .. } => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::Incomplete(inner) => ApiError::Incomplete(inner),
            InstrumentError::UnknownInstrument(_) => ApiError::NotFound(e.to_string()),
            InstrumentError::UnknownQuestion(_)
            | InstrumentError::NotActiveQuestion { .. }
            | InstrumentError::UnknownChoice { .. } => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<PredictorError> for ApiError {
    fn from(e: PredictorError) -> Self {
        match e {
            PredictorError::UnrecognizedLabel(_) | PredictorError::EncodedOutOfRange { .. } => {
                ApiError::PredictionFailed(e.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NoOutcome => {
                ApiError::Conflict("no results yet: request a prediction first".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
