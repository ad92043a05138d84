use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use qr_registration::database::person_repo;
use qr_registration::web;
use tower::ServiceExt;

// In-memory SQLite: a single connection, otherwise every pooled connection
// would see its own empty database.
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    person_repo::ensure_schema(&pool).await.unwrap();
    web::app(pool)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn jean() -> Value {
    json!({
        "firstName": "Jean",
        "lastName": "Dupont",
        "email": "jean@x.fr",
        "phone": "0612345678",
    })
}

#[tokio::test]
async fn register_returns_person_and_qr_payload() {
    let app = test_app().await;
    let (status, body) = post_json(&app, "/register", jean()).await;

    assert_eq!(status, StatusCode::CREATED);
    let person = &body["person"];
    let id = person["id"].as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(person["qrCodeData"], id);
    assert_eq!(body["qrCode"], id);
    assert_eq!(person["firstName"], "Jean");
    assert_eq!(person["lastName"], "Dupont");
    assert!(person["createdAt"].is_string());
}

#[tokio::test]
async fn register_rejects_invalid_input_with_field_details() {
    let app = test_app().await;
    let (status, body) = post_json(
        &app,
        "/register",
        json!({
            "firstName": "A",
            "lastName": "Dupont",
            "email": "not-an-email",
            "phone": "123",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation error");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"firstName"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"phone"));

    // Nothing persisted.
    let (_, listing) = get(&app, "/persons").await;
    assert_eq!(listing["count"], 0);
}

#[tokio::test]
async fn register_with_malformed_body_still_answers_json() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Failed to register person");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn register_then_verify_round_trip() {
    let app = test_app().await;
    let (_, registered) = post_json(&app, "/register", jean()).await;
    let code = registered["qrCode"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/verify?code={}", code)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Personne trouvée");
    assert_eq!(body["person"], registered["person"]);
}

#[tokio::test]
async fn verify_unknown_code_is_not_found() {
    let app = test_app().await;
    let (status, body) = get(&app, "/verify?code=never-issued").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Personne non trouvée");
    assert!(body.get("person").is_none());
}

#[tokio::test]
async fn verify_without_code_is_bad_request() {
    let app = test_app().await;

    let (status, body) = get(&app, "/verify").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "QR code manquant");

    let (status, _) = get(&app, "/verify?code=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let app = test_app().await;
    let (status, body) = get(&app, "/persons").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["persons"], json!([]));
}

#[tokio::test]
async fn listing_is_newest_first() {
    let app = test_app().await;
    let (_, first) = post_json(&app, "/register", jean()).await;
    let (_, second) = post_json(
        &app,
        "/register",
        json!({
            "firstName": "Marie",
            "lastName": "Curie",
            "email": "marie@x.fr",
            "phone": "0698765432",
        }),
    )
    .await;

    let (status, body) = get(&app, "/persons").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    let persons = body["persons"].as_array().unwrap();
    assert_eq!(persons[0]["id"], second["person"]["id"]);
    assert_eq!(persons[1]["id"], first["person"]["id"]);
}

#[tokio::test]
async fn ticket_renders_for_registered_person() {
    let app = test_app().await;
    let (_, registered) = post_json(&app, "/register", jean()).await;
    let id = registered["person"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/persons/{}/ticket", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Jean Dupont"));
    assert!(html.contains("<svg"));
    assert!(html.contains(id));
}

#[tokio::test]
async fn ticket_for_unknown_person_is_not_found() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/persons/unknown/ticket")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
