use sqlx::SqlitePool;

use crate::models::PersonRow;

const SQL_CREATE_PERSONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS persons (
  id TEXT PRIMARY KEY,
  first_name TEXT NOT NULL,
  last_name TEXT NOT NULL,
  email TEXT NOT NULL,
  phone TEXT NOT NULL,
  qr_code_data TEXT NOT NULL,
  created_at TEXT NOT NULL
)
"#;

const SQL_INSERT_PERSON: &str = r#"
INSERT INTO persons (
  id,
  first_name,
  last_name,
  email,
  phone,
  qr_code_data,
  created_at
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub const SQL_FIND_PERSON_BY_QR_CODE: &str = r#"
SELECT
    id,
    first_name,
    last_name,
    email,
    phone,
    qr_code_data,
    created_at
FROM persons
WHERE qr_code_data = ?1
LIMIT 1
"#;

pub const SQL_FIND_PERSON_BY_ID: &str = r#"
SELECT
    id,
    first_name,
    last_name,
    email,
    phone,
    qr_code_data,
    created_at
FROM persons
WHERE id = ?1
LIMIT 1
"#;

pub const SQL_LIST_PERSONS: &str = r#"
SELECT
    id,
    first_name,
    last_name,
    email,
    phone,
    qr_code_data,
    created_at
FROM persons
ORDER BY created_at DESC
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_PERSONS_TABLE).execute(pool).await?;
    Ok(())
}

pub async fn insert_person(pool: &SqlitePool, person: &PersonRow) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PERSON)
        .bind(&person.id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.email)
        .bind(&person.phone)
        .bind(&person.qr_code_data)
        .bind(person.created_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn find_person_by_qr_code(
    pool: &SqlitePool,
    code: &str,
) -> sqlx::Result<Option<PersonRow>> {
    sqlx::query_as::<_, PersonRow>(SQL_FIND_PERSON_BY_QR_CODE)
        .bind(code)
        .fetch_optional(pool)
        .await
}

pub async fn find_person_by_id(
    pool: &SqlitePool,
    person_id: &str,
) -> sqlx::Result<Option<PersonRow>> {
    sqlx::query_as::<_, PersonRow>(SQL_FIND_PERSON_BY_ID)
        .bind(person_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_persons(pool: &SqlitePool) -> sqlx::Result<Vec<PersonRow>> {
    sqlx::query_as::<_, PersonRow>(SQL_LIST_PERSONS)
        .fetch_all(pool)
        .await
}

pub async fn count_persons(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM persons")
        .fetch_one(pool)
        .await
}
