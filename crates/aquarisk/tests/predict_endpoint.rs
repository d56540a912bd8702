//! End-to-end tests for the prediction endpoint.
//!
//! Drives the router in-process (no socket) and checks the response
//! contract: six probabilities in label order, each strictly in (0, 1),
//! and categorized client errors for schema violations.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use aquarisk::serve::AppState;
use aquarisk::{create_router, testing};

fn router() -> Router {
    create_router(AppState::new(Arc::new(testing::demo_model())))
}

fn post_predict(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn example_payload() -> Value {
    json!({
        "age": 51,
        "gender": "female",
        "water_src": "spring",
        "sanitation": "good",
        "vacc_typhoid": 0,
        "vacc_hepA": 1,
        "diarrhea_count": 3,
        "vomit_count": 2,
        "body_temp": 40.16,
        "dehydration": 1,
        "jaundice": 0,
        "dark_urine": 0,
        "pale_stool": 0,
        "headache": 0,
        "fatigue": 1,
        "muscle_ache": 1,
        "stool_type": "watery"
    })
}

#[tokio::test]
async fn example_record_returns_six_probabilities() {
    let response = router()
        .oneshot(post_predict(example_payload().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let probs = body["predicted_probabilities"]
        .as_array()
        .expect("predicted_probabilities is an array");

    assert_eq!(probs.len(), 6);
    for p in probs {
        let p = p.as_f64().expect("probability is a number");
        assert!(p > 0.0 && p < 1.0, "probability {} not in (0,1)", p);
    }
}

#[tokio::test]
async fn response_follows_label_order() {
    let response = router()
        .oneshot(post_predict(example_payload().to_string()))
        .await
        .unwrap();
    let body = body_json(response).await;

    let model = testing::demo_model();
    let expected = model.predict(&testing::demo_row());

    let probs = body["predicted_probabilities"].as_array().unwrap();
    for (got, want) in probs.iter().zip(expected) {
        assert!((got.as_f64().unwrap() - want as f64).abs() < 1e-6);
    }
}

#[tokio::test]
async fn empty_record_is_unprocessable() {
    let response = router().oneshot(post_predict("{}".into())).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(message.contains("missing feature"), "message: {message}");
}

#[tokio::test]
async fn unknown_feature_is_unprocessable() {
    let mut payload = example_payload();
    payload["wingspan"] = json!(2.1);

    let response = router()
        .oneshot(post_predict(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_category_names_the_vocabulary() {
    let mut payload = example_payload();
    payload["water_src"] = json!("ocean");

    let response = router()
        .oneshot(post_predict(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(message.contains("ocean"), "message: {message}");
    assert!(message.contains("spring"), "message: {message}");
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let response = router()
        .oneshot(post_predict("{not json".into()))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn null_feature_is_accepted_as_missing() {
    let mut payload = example_payload();
    payload["body_temp"] = Value::Null;

    let response = router()
        .oneshot(post_predict(payload.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["predicted_probabilities"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn healthz_reports_model_shape() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["n_features"], 17);
    assert_eq!(
        body["labels"].as_array().unwrap().len(),
        6,
        "labels: {:?}",
        body["labels"]
    );
    assert_eq!(body["labels"][1], "cholera");
}
