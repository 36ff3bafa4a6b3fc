use crate::models::DbSession;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_session(
    pool: &Pool<Postgres>,
    token: &str,
    admin_id: Uuid,
    expires_at: DateTime<Utc>,
) -> Result<DbSession> {
    let now = Utc::now();

    let session = sqlx::query_as::<_, DbSession>(
        r#"
        INSERT INTO sessions (token, admin_id, created_at, expires_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, admin_id, created_at, expires_at
        "#,
    )
    .bind(token)
    .bind(admin_id)
    .bind(now)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

pub async fn get_session(pool: &Pool<Postgres>, token: &str) -> Result<Option<DbSession>> {
    let session = sqlx::query_as::<_, DbSession>(
        r#"
        SELECT token, admin_id, created_at, expires_at
        FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

pub async fn delete_session(pool: &Pool<Postgres>, token: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE token = $1
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Housekeeping for tokens past their expiry.
pub async fn delete_expired_sessions(pool: &Pool<Postgres>) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM sessions
        WHERE expires_at < NOW()
        "#,
    )
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
