use qrcode::render::svg;
use qrcode::QrCode;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::person_repo;
use crate::models::PersonRow;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

pub struct TicketView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub code: String,
    /// Inline SVG markup for the QR code, embedded as-is in the template.
    pub qr_svg: String,
    pub registered_at: String,
}

pub async fn load_ticket_view(
    pool: &SqlitePool,
    person_id: &str,
) -> Result<Option<TicketView>, TicketError> {
    let Some(row) = person_repo::find_person_by_id(pool, person_id).await? else {
        return Ok(None);
    };
    Ok(Some(build_ticket_view(&row)?))
}

fn build_ticket_view(row: &PersonRow) -> Result<TicketView, TicketError> {
    Ok(TicketView {
        full_name: format!("{} {}", row.first_name, row.last_name),
        email: row.email.clone(),
        phone: row.phone.clone(),
        code: row.qr_code_data.clone(),
        qr_svg: qr_svg(&row.qr_code_data)?,
        registered_at: row.created_at.format("%Y-%m-%d %H:%M").to_string(),
    })
}

fn qr_svg(payload: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(payload.as_bytes())?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(220, 220)
        .build())
}
