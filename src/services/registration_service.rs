use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::database::person_repo;
use crate::models::{NewPerson, PersonRow};

/// One violated field constraint, reported with the JSON field name so the
/// client can render the message next to the right input.
#[derive(Debug, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug)]
pub struct RegisteredPerson {
    pub person: PersonRow,
    /// The QR payload, equal to `person.id`.
    pub qr_code: String,
}

/// The identifier doubles as primary key and QR payload. Random v4, so no
/// store round-trip is needed before the insert.
fn new_person_id() -> String {
    Uuid::new_v4().to_string()
}

pub async fn register_person(
    pool: &SqlitePool,
    input: NewPerson,
) -> Result<RegisteredPerson, RegistrationError> {
    if let Err(errors) = input.validate() {
        return Err(RegistrationError::Validation(field_violations(&errors)));
    }

    let id = new_person_id();
    let person = PersonRow {
        id: id.clone(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email,
        phone: input.phone,
        qr_code_data: id.clone(),
        created_at: Utc::now(),
    };
    person_repo::insert_person(pool, &person).await?;

    Ok(RegisteredPerson {
        person,
        qr_code: id,
    })
}

fn field_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldViolation {
                field: wire_field_name(field).to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// Validator reports Rust field names; the API speaks camelCase.
fn wire_field_name(field: &str) -> &str {
    match field {
        "first_name" => "firstName",
        "last_name" => "lastName",
        other => other,
    }
}
