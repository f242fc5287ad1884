//! Integration tests for Session and feedback API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, FeedbackRepository, SqliteDatabase};

async fn test_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create test database");
    db.migrate().await.expect("Failed to run migrations");
    db
}

async fn test_app() -> axum::Router {
    routes::create_router(AppState::new(test_db().await))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Helper to create a patient and one session for it, returning the session ID
async fn create_session(app: &axum::Router) -> i64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/patients",
            json!({"name": "Ana", "age": 30}),
        ))
        .await
        .unwrap();
    let patient = json_body(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/sessions",
            json!({"patient_id": patient["id"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["id"].as_i64().unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn list_sessions_returns_created() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/sessions")).await.unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    let first = create_session(&app).await;
    let second = create_session(&app).await;

    let response = app.oneshot(get("/sessions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_session_for_unknown_patient_is_404_and_not_stored() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/sessions", json!({"patient_id": 12})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Patient not found");

    let response = app.oneshot(get("/sessions")).await.unwrap();
    assert!(json_body(response).await.as_array().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_session_ignores_diagnosis_fields() {
    let app = test_app().await;
    create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/sessions",
            json!({"patient_id": 1, "diagnosis": "flu", "treatment_plan": "rest"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["diagnosis"].is_null());
    assert!(body["treatment_plan"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_session_without_patient_id_is_422() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/sessions", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("patient_id"));
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_session_returns_404() {
    let app = test_app().await;

    let response = app.oneshot(get("/sessions/5")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Session not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_only_diagnosis_keeps_other_fields() {
    let app = test_app().await;
    let id = create_session(&app).await;
    let uri = format!("/sessions/{}", id);

    app.clone()
        .oneshot(json_request("PUT", &uri, json!({"treatment_plan": "rest"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("{}/feedback", uri),
            json!({"feedback": "tired"}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, json!({"diagnosis": "flu"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["diagnosis"], "flu");
    assert_eq!(body["treatment_plan"], "rest");
    assert_eq!(body["feedback"], "tired");

    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(json_body(response).await, body);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_null_clears_and_empty_string_sets() {
    let app = test_app().await;
    let id = create_session(&app).await;
    let uri = format!("/sessions/{}", id);

    app.clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"diagnosis": "flu", "treatment_plan": "rest"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &uri,
            json!({"diagnosis": null, "treatment_plan": ""}),
        ))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert!(body["diagnosis"].is_null());
    assert_eq!(body["treatment_plan"], "");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_empty_body_changes_nothing() {
    let app = test_app().await;
    let id = create_session(&app).await;
    let uri = format!("/sessions/{}", id);

    let before = json_body(app.clone().oneshot(get(&uri)).await.unwrap()).await;

    let response = app
        .oneshot(json_request("PUT", &uri, json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, before);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_session_returns_404() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("PUT", "/sessions/8", json!({"diagnosis": "flu"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_with_wrong_type_is_422() {
    let app = test_app().await;
    let id = create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/sessions/{}", id),
            json!({"diagnosis": 42}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test(flavor = "multi_thread")]
async fn feedback_updates_session_and_appends_one_record() {
    let db = test_db().await;
    let state = AppState::new(db);
    let app = routes::create_router(state.clone());
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/sessions/{}/feedback", id),
            json!({"feedback": "felt better"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Feedback submitted successfully");

    let response = app
        .oneshot(get(&format!("/sessions/{}", id)))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["feedback"], "felt better");

    let history = state.db().feedback().list_for_session(id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "felt better");
    assert_eq!(history[0].session_id, id);
}

#[tokio::test(flavor = "multi_thread")]
async fn feedback_for_unknown_session_returns_404() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/sessions/3/feedback",
            json!({"feedback": "hello"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Session not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_feedback_is_422() {
    let app = test_app().await;
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/sessions/{}/feedback", id),
            json!({"feedback": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/sessions/{}/feedback", id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .oneshot(get(&format!("/sessions/{}", id)))
        .await
        .unwrap();
    assert!(json_body(response).await["feedback"].is_null());
}

#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_session_id_returns_json_400() {
    let app = test_app().await;

    let requests = [
        get("/sessions/abc"),
        json_request("PUT", "/sessions/abc", json!({"diagnosis": "flu"})),
        json_request("POST", "/sessions/abc/feedback", json!({"feedback": "ok"})),
    ];

    for request in requests {
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("application/json"));
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("abc"));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_feedback_with_whitespace_is_422() {
    let app = test_app().await;
    let id = create_session(&app).await;

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/sessions/{}/feedback", id),
            json!({"feedback": "  \n "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "feedback must not be empty");
}
