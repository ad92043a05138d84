use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::ticket_service;

#[derive(Template)]
#[template(path = "ticket.html")]
pub struct TicketTemplate {
    pub ticket: ticket_service::TicketView,
}

/// `GET /persons/:person_id/ticket` — printable ticket for a registrant,
/// QR code inlined as SVG. Print-to-PDF is the export path.
pub async fn ticket_handler(
    Path(person_id): Path<String>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let view = match ticket_service::load_ticket_view(&pool, &person_id).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Ticket render failed for {}: {}", person_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let Some(view) = view else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let template = TicketTemplate { ticket: view };
    Html(template.render().unwrap()).into_response()
}
