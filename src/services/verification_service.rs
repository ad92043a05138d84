use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::person_repo;
use crate::models::PersonRow;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The query parameter was absent or empty.
    #[error("QR code manquant")]
    CodeMissing,
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Resolves a scanned code back to its registrant. `Ok(None)` is the normal
/// "nobody has this code" outcome, not a failure. Read-only.
pub async fn verify_code(
    pool: &SqlitePool,
    code: Option<&str>,
) -> Result<Option<PersonRow>, VerifyError> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(VerifyError::CodeMissing)?;
    Ok(person_repo::find_person_by_qr_code(pool, code).await?)
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        person_repo::ensure_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn missing_or_empty_code_is_rejected() {
        let pool = test_pool().await;
        assert!(matches!(
            verify_code(&pool, None).await,
            Err(VerifyError::CodeMissing)
        ));
        assert!(matches!(
            verify_code(&pool, Some("")).await,
            Err(VerifyError::CodeMissing)
        ));
    }

    #[tokio::test]
    async fn unknown_code_is_a_normal_miss() {
        let pool = test_pool().await;
        let found = verify_code(&pool, Some("no-such-code")).await.unwrap();
        assert!(found.is_none());
    }
}
