mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use ppd_core::models::features::FeatureRecord;
use ppd_predictor::error::PredictorError;
use ppd_predictor::{Predictor, RawPrediction};
use ppd_server::error::PREDICTION_FAILED_MESSAGE;

use common::{answer_all, app, create_session, fill_demographics, send, send_raw, state_with};

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn instrument_catalogue_publishes_answer_key() {
    let app = app();
    let (status, list) = send(&app, "GET", "/instruments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], "epds");

    let (status, detail) = send(&app, "GET", "/instruments/epds", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["max_total"], 30);
    assert_eq!(detail["questions"].as_array().unwrap().len(), 10);
    assert_eq!(detail["questions"][9]["id"], "Q10");
    assert_eq!(detail["questions"][0]["choices"][3]["text"], "Not at all");
    assert_eq!(detail["questions"][0]["choices"][3]["score"], 3);

    let (status, _) = send(&app, "GET", "/instruments/phq9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_screening_yields_prediction_and_report() {
    let app = app();
    let id = create_session(&app).await;
    fill_demographics(&app, &id, "Low").await;
    answer_all(&app, &id, [0, 0, 3, 3, 3, 3, 3, 3, 3, 3]).await;

    let (status, view) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["is_complete"], true);
    assert_eq!(view["progress"]["percent"], 100);
    assert!(view["active_question"].is_null());

    let (status, score) = send(&app, "GET", &format!("/sessions/{id}/score"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["epds_score"], 27);
    assert_eq!(score["max_score"], 30);

    let (status, prediction) =
        send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prediction["label"], "Profound");
    assert_eq!(prediction["color"], "darkred");
    assert_eq!(prediction["encoded_value"], 3);
    assert_eq!(prediction["epds_score"], 27);

    let (status, stored) = send(&app, "GET", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["label"], "Profound");

    let (status, view) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["outcome"]["features"]["EPDS_Score"], 27);
    assert_eq!(view["outcome"]["features"]["FamilySupport"], "Low");
    assert_eq!(view["outcome"]["features"]["Q3"], 3);

    let (status, html) = send_raw(&app, "GET", &format!("/sessions/{id}/report"), None).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains("Profound"));
    assert!(html.contains("(out of a maximum of 30)"));
    assert!(html.contains("Mild (0)"));
}

#[tokio::test]
async fn prediction_blocked_until_input_complete() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing"].as_array().unwrap().len(), 13);

    fill_demographics(&app, &id, "High").await;
    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Please complete the questionnaire before viewing your results."
    );
    assert_eq!(body["missing"][0], "Q1");

    let (status, _) = send(&app, "GET", &format!("/sessions/{id}/score"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn demographics_gate_message() {
    let app = app();
    let id = create_session(&app).await;
    answer_all(&app, &id, [1; 10]).await;

    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Please complete all demographic questions before proceeding."
    );
    assert_eq!(
        body["missing"],
        json!(["is_pregnant", "recent_birth", "family_support"])
    );
}

#[tokio::test]
async fn refused_navigation_leaves_cursor() {
    let app = app();
    let id = create_session(&app).await;

    let (status, view) = send(&app, "POST", &format!("/sessions/{id}/retreat"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["cursor"], 0);
    assert_eq!(view["can_retreat"], false);

    let (status, view) = send(&app, "POST", &format!("/sessions/{id}/advance"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["cursor"], 0);
    assert_eq!(view["can_advance"], false);
}

#[tokio::test]
async fn only_the_active_question_accepts_answers() {
    let app = app();
    let id = create_session(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/answers/Q2"),
        Some(json!({ "choice": "Hardly at all" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/answers/Q1"),
        Some(json!({ "choice": "Maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/answers/Q11"),
        Some(json!({ "choice": "Never" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, view) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/answers/Q1"),
        Some(json!({ "choice": "Not at all" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["selected_answer"], "Not at all");
    assert_eq!(view["can_advance"], true);
}

#[tokio::test]
async fn invalid_demographics_rejected() {
    let app = app();
    let id = create_session(&app).await;

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/demographics"),
        Some(json!({ "age": 50, "is_pregnant": "No" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/demographics"),
        Some(json!({ "age": 30, "family_support": "Plenty" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, view) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/demographics"),
        Some(json!({ "is_pregnant": "Yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["demographics"]["age"], 25);
    assert_eq!(view["demographics_valid"], false);
    assert_eq!(view["warnings"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn reset_starts_over_in_place() {
    let app = app();
    let id = create_session(&app).await;
    fill_demographics(&app, &id, "Medium").await;
    answer_all(&app, &id, [2; 10]).await;
    let (status, _) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, view) = send(&app, "POST", &format!("/sessions/{id}/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["id"], id.as_str());
    assert_eq!(view["cursor"], 0);
    assert!(view["outcome"].is_null());
    assert_eq!(view["demographics_valid"], false);

    let (status, _) = send(&app, "GET", &format!("/sessions/{id}/report"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn missing_and_deleted_sessions() {
    let app = app();
    let unknown = uuid::Uuid::new_v4();
    let (status, body) = send(&app, "GET", &format!("/sessions/{unknown}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("session not found"));

    let id = create_session(&app).await;
    let (status, _) = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sessions_are_isolated() {
    let app = app();
    let first = create_session(&app).await;
    let second = create_session(&app).await;
    assert_ne!(first, second);

    fill_demographics(&app, &first, "Low").await;
    let (_, view) = send(&app, "GET", &format!("/sessions/{second}"), None).await;
    assert_eq!(view["demographics_valid"], false);
}

struct UnknownLabelPredictor;

impl Predictor for UnknownLabelPredictor {
    fn predict(&self, _record: &FeatureRecord) -> Result<RawPrediction, PredictorError> {
        Ok(RawPrediction {
            encoded: 0,
            probability: None,
        })
    }

    fn decode(&self, _encoded: u8) -> Result<&str, PredictorError> {
        Ok("Catastrophic")
    }
}

#[tokio::test]
async fn unrecognized_label_is_a_generic_failure() {
    let app = ppd_server::router(state_with(Arc::new(UnknownLabelPredictor)));
    let id = create_session(&app).await;
    fill_demographics(&app, &id, "Low").await;
    answer_all(&app, &id, [1; 10]).await;

    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], PREDICTION_FAILED_MESSAGE);

    let (_, view) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert!(view["outcome"].is_null());
}

#[tokio::test]
async fn idle_sessions_are_evicted() {
    let state = state_with(Arc::new(common::sample_model()));
    let app = ppd_server::router(state.clone());
    let id = create_session(&app).await;

    assert_eq!(state.evict_idle(jiff::Timestamp::now()).await, 0);

    let later = jiff::Timestamp::now() + jiff::SignedDuration::from_secs(2 * 60 * 60);
    assert_eq!(state.evict_idle(later).await, 1);

    let (status, _) = send(&app, "GET", &format!("/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn prediction_waits_for_the_final_advance() {
    let app = app();
    let id = create_session(&app).await;
    fill_demographics(&app, &id, "Low").await;
    answer_all(&app, &id, [3; 10]).await;

    let (status, view) = send(&app, "POST", &format!("/sessions/{id}/retreat"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["cursor"], 9);
    assert_eq!(view["selected_answer"], "Yes, quite often");

    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing"], json!(["Q10"]));

    for _ in 0..5 {
        send(&app, "POST", &format!("/sessions/{id}/retreat"), None).await;
    }
    let (status, body) = send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["missing"], json!(["Q5", "Q6", "Q7", "Q8", "Q9", "Q10"]));

    for _ in 0..6 {
        send(&app, "POST", &format!("/sessions/{id}/advance"), None).await;
    }
    let (status, prediction) =
        send(&app, "POST", &format!("/sessions/{id}/prediction"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prediction["epds_score"], 30);
}

#[tokio::test]
async fn malformed_bodies_get_json_bad_request() {
    let app = app();
    let id = create_session(&app).await;

    for body in [
        json!({ "age": 300, "is_pregnant": "No" }),
        json!({ "age": "thirty" }),
        json!({ "age": -1 }),
    ] {
        let (status, error) = send(
            &app,
            "PUT",
            &format!("/sessions/{id}/demographics"),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error["error"].is_string());
    }

    let (status, error) = send(
        &app,
        "PUT",
        &format!("/sessions/{id}/answers/Q1"),
        Some(json!({ "choice": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
}
