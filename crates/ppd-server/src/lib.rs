//! ppd-server
//!
//! HTTP service for the postpartum depression risk screening: per-user
//! sessions walking through the EPDS, the prediction gate, and the results
//! report.

pub mod audit;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Instruments (public answer key)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        // Sessions
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route(
            "/sessions/{id}/demographics",
            put(routes::sessions::put_demographics),
        )
        .route(
            "/sessions/{id}/answers/{question_id}",
            put(routes::sessions::put_answer),
        )
        .route("/sessions/{id}/advance", post(routes::sessions::advance))
        .route("/sessions/{id}/retreat", post(routes::sessions::retreat))
        .route("/sessions/{id}/reset", post(routes::sessions::reset))
        .route("/sessions/{id}/score", get(routes::sessions::get_score))
        .route(
            "/sessions/{id}/prediction",
            post(routes::prediction::predict).get(routes::prediction::get_prediction),
        )
        .route("/sessions/{id}/report", get(routes::reports::get_report))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

/// Evict idle sessions once per `period` until the process exits.
pub async fn run_session_reaper(state: AppState, period: std::time::Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let evicted = state.evict_idle(jiff::Timestamp::now()).await;
        if evicted > 0 {
            tracing::info!(evicted, "idle sessions evicted");
        }
    }
}
