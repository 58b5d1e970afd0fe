use axum::extract::{Path, State};
use axum::response::Html;
use uuid::Uuid;

use ppd_export::render::render_report;
use ppd_export::report::ResultReport;

use crate::error::ApiError;
use crate::state::AppState;

/// Render the HTML results page for a scored session.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, ApiError> {
    let report = {
        let sessions = state.sessions.lock().await;
        let session = sessions.get(&id).ok_or_else(|| ApiError::session_not_found(id))?;
        ResultReport::from_session(session)?
    };

    let html = render_report(&report)?;
    Ok(Html(html))
}
