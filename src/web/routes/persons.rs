use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::persons_service;

/// `GET /persons` — every registrant, newest first.
pub async fn persons_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match persons_service::list_persons(&pool).await {
        Ok(persons) => Ok(Json(json!({
            "success": true,
            "count": persons.len(),
            "persons": persons,
        }))),
        Err(e) => {
            warn!("Persons listing failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Erreur lors de la récupération des personnes",
                })),
            ))
        }
    }
}
