use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::verification_service::{self, VerifyError};

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    code: Option<String>,
}

/// `GET /verify?code=<payload>` — resolves a scanned code back to its
/// registrant. A miss is a 404 with `success: false`, not a server error:
/// most scans are valid, but an unknown code is an everyday outcome.
pub async fn verify_handler(
    State(pool): State<SqlitePool>,
    Query(q): Query<VerifyQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match verification_service::verify_code(&pool, q.code.as_deref()).await {
        Ok(Some(person)) => Ok(Json(json!({
            "success": true,
            "message": "Personne trouvée",
            "person": person,
        }))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "message": "Personne non trouvée",
            })),
        )),
        Err(VerifyError::CodeMissing) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "QR code manquant",
            })),
        )),
        Err(VerifyError::Storage(e)) => {
            warn!("QR code verification failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Erreur lors de la vérification du QR code",
                })),
            ))
        }
    }
}
