use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered person. `qr_code_data` is what ends up inside the QR code
/// and is always equal to `id`; the column exists because the API exposes
/// both fields. Rows are append-only: never updated, never deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PersonRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub qr_code_data: String,
    pub created_at: DateTime<Utc>,
}

/// Registration form input, validated before anything touches the database.
/// Fields default to empty so an absent field shows up as a per-field
/// violation instead of a body-level deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPerson {
    #[validate(length(min = 2, message = "Le prénom doit contenir au moins 2 caractères"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Le nom doit contenir au moins 2 caractères"))]
    pub last_name: String,
    #[validate(email(message = "Adresse e-mail invalide"))]
    pub email: String,
    #[validate(length(min = 10, message = "Le téléphone doit contenir au moins 10 caractères"))]
    pub phone: String,
}
