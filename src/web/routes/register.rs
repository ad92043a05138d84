use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::models::NewPerson;
use crate::services::registration_service::{self, RegistrationError};

/// `POST /register` — validates the submitted details, assigns the
/// identifier and returns the persisted record plus the QR payload.
/// Every failure answers with the JSON envelope, including a body that
/// never made it through the extractor.
pub async fn register_handler(
    State(pool): State<SqlitePool>,
    input: Result<Json<NewPerson>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let Json(input) = input.map_err(|rejection| {
        (
            rejection.status(),
            Json(json!({
                "error": "Failed to register person",
                "message": rejection.body_text(),
            })),
        )
    })?;

    match registration_service::register_person(&pool, input).await {
        Ok(registered) => Ok((
            StatusCode::CREATED,
            Json(json!({
                "person": registered.person,
                "qrCode": registered.qr_code,
            })),
        )),
        Err(RegistrationError::Validation(details)) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Validation error",
                "details": details,
            })),
        )),
        Err(RegistrationError::Storage(e)) => {
            warn!("Person registration failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to register person",
                    "message": e.to_string(),
                })),
            ))
        }
    }
}
