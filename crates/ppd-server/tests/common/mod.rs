#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use ppd_instruments::instruments::epds::EPDS;
use ppd_instruments::scoring::QuestionId;
use ppd_predictor::Predictor;
use ppd_predictor::linear::LinearClassifier;
use ppd_server::config::ServerConfig;
use ppd_server::state::AppState;

pub fn sample_model() -> LinearClassifier {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/ppd_model.json");
    LinearClassifier::load(&path).unwrap()
}

pub fn state_with(predictor: Arc<dyn Predictor>) -> AppState {
    AppState::new(predictor, ServerConfig::default())
}

pub fn app() -> Router {
    ppd_server::router(state_with(Arc::new(sample_model())))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

pub async fn create_session(app: &Router) -> String {
    let (status, view) = send(app, "POST", "/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    view["id"].as_str().unwrap().to_string()
}

pub async fn fill_demographics(app: &Router, id: &str, support: &str) {
    let (status, view) = send(
        app,
        "PUT",
        &format!("/sessions/{id}/demographics"),
        Some(serde_json::json!({
            "age": 30,
            "is_pregnant": "No",
            "recent_birth": "Yes",
            "family_support": support,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["demographics_valid"], true);
}

/// Answer every item with the option carrying the given code, advancing after each.
pub async fn answer_all(app: &Router, id: &str, codes: [u8; 10]) {
    for (index, code) in codes.into_iter().enumerate() {
        let question = QuestionId::from_index(index).unwrap();
        let choice = EPDS.choice_for_code(question, code).unwrap();
        let (status, _) = send(
            app,
            "PUT",
            &format!("/sessions/{id}/answers/{question}"),
            Some(serde_json::json!({ "choice": choice })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, view) = send(app, "POST", &format!("/sessions/{id}/advance"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["cursor"], index + 1);
    }
}
