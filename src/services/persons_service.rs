use sqlx::SqlitePool;

use crate::database::person_repo;
use crate::models::PersonRow;

/// All registrants, newest first. Full scan by design: the expected data
/// volume is small and the listing has no pagination. The sort runs on the
/// decoded timestamps so ordering never depends on how the store encodes them.
pub async fn list_persons(pool: &SqlitePool) -> sqlx::Result<Vec<PersonRow>> {
    let mut persons = person_repo::list_persons(pool).await?;
    persons.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(persons)
}
