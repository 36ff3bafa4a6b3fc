use crate::models::DbAdmin;
use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres};
use tutordesk_core::models::admin::SaveAdminRequest;
use uuid::Uuid;

const ADMIN_COLUMNS: &str = "id, first_name, last_name, email, phone, password_hash, is_root, \
     active, created_at, updated_at";

pub async fn create_admin(
    pool: &Pool<Postgres>,
    req: &SaveAdminRequest,
    password_hash: Option<&str>,
    is_root: bool,
) -> Result<DbAdmin> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating admin: id={}, email={}, is_root={}", id, req.email, is_root);

    let admin = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        INSERT INTO admins (id, first_name, last_name, email, phone, password_hash, is_root,
                            active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $8)
        RETURNING {ADMIN_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(password_hash)
    .bind(is_root)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(admin)
}

pub async fn get_admin_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAdmin>> {
    let admin = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        SELECT {ADMIN_COLUMNS}
        FROM admins
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

pub async fn get_admin_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbAdmin>> {
    let admin = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        SELECT {ADMIN_COLUMNS}
        FROM admins
        WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

pub async fn list_admins(pool: &Pool<Postgres>) -> Result<Vec<DbAdmin>> {
    let admins = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        SELECT {ADMIN_COLUMNS}
        FROM admins
        ORDER BY first_name ASC, last_name ASC
        "#
    ))
    .fetch_all(pool)
    .await?;

    Ok(admins)
}

pub async fn update_admin(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: &SaveAdminRequest,
    password_hash: Option<&str>,
) -> Result<Option<DbAdmin>> {
    let now = Utc::now();

    let admin = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        UPDATE admins
        SET first_name = $2, last_name = $3, email = $4, phone = $5,
            password_hash = COALESCE($6, password_hash), updated_at = $7
        WHERE id = $1
        RETURNING {ADMIN_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(password_hash)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

pub async fn set_admin_active(
    pool: &Pool<Postgres>,
    id: Uuid,
    active: bool,
) -> Result<Option<DbAdmin>> {
    let now = Utc::now();

    let admin = sqlx::query_as::<_, DbAdmin>(&format!(
        r#"
        UPDATE admins
        SET active = $2, updated_at = $3
        WHERE id = $1
        RETURNING {ADMIN_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(active)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(admin)
}

/// Checks `password` against the stored hash for `email`. Returns the admin
/// record on success, `None` for unknown emails, inactive accounts, accounts
/// without a password, or a mismatch.
pub async fn verify_password(
    pool: &Pool<Postgres>,
    email: &str,
    password: &str,
) -> Result<Option<DbAdmin>> {
    let Some(admin) = get_admin_by_email(pool, email).await? else {
        return Ok(None);
    };

    if !admin.active {
        return Ok(None);
    }

    let Some(hash) = admin.password_hash.as_deref() else {
        return Ok(None);
    };

    let parsed_hash =
        argon2::PasswordHash::new(hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid.then_some(admin))
}

/// Creates the root admin account on first run when none exists for `email`.
pub async fn ensure_base_admin(
    pool: &Pool<Postgres>,
    email: &str,
    password_hash: &str,
) -> Result<DbAdmin> {
    if let Some(existing) = get_admin_by_email(pool, email).await? {
        return Ok(existing);
    }

    tracing::info!("Bootstrapping base admin account: {}", email);

    let req = SaveAdminRequest {
        first_name: "Base".to_string(),
        last_name: "Admin".to_string(),
        email: email.to_string(),
        phone: String::new(),
        password: None,
    };

    create_admin(pool, &req, Some(password_hash), true).await
}
