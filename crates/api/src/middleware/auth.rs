//! # Authentication Module
//!
//! Password hashing and the bearer-session middleware for the TutorDesk API.
//!
//! Admin passwords are hashed with Argon2 before storage. Logging in issues
//! an opaque random token stored server-side; the middleware resolves that
//! token into an explicit [`Session`] value and attaches it to the request,
//! so handlers receive identity as a parameter instead of reading ambient
//! state.

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use eyre::Result;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;
use tutordesk_core::{errors::DeskError, models::admin::Session};

use crate::{ApiState, middleware::error_handling::AppError};

/// Length of issued session tokens.
const TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// Generates a fresh random salt per password and returns the hash in PHC
/// string format, ready for storage.
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Generates an opaque session token.
pub fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Extracts the bearer token from an Authorization header value.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves a bearer token into a live [`Session`].
///
/// Rejects unknown tokens, expired tokens, and tokens whose admin account has
/// been inactivated since login.
pub async fn resolve_session(state: &ApiState, token: &str) -> Result<Session, DeskError> {
    let db_session = tutordesk_db::repositories::session::get_session(&state.db_pool, token)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::Authentication("Invalid session token".to_string()))?;

    if db_session.expires_at <= Utc::now() {
        return Err(DeskError::Authentication("Session expired".to_string()));
    }

    let admin =
        tutordesk_db::repositories::admin::get_admin_by_id(&state.db_pool, db_session.admin_id)
            .await
            .map_err(DeskError::Database)?
            .ok_or_else(|| DeskError::Authentication("Invalid session token".to_string()))?;

    if !admin.active {
        return Err(DeskError::Authentication(
            "Admin account is inactive".to_string(),
        ));
    }

    Ok(Session {
        token: db_session.token,
        admin_id: admin.id,
        is_root: admin.is_root,
        created_at: db_session.created_at,
        expires_at: db_session.expires_at,
    })
}

/// Axum middleware guarding the authenticated routes.
///
/// On success the resolved [`Session`] is inserted as a request extension for
/// handlers that need identity (e.g. admin management).
pub async fn require_session(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = bearer_token(header).ok_or_else(|| {
        AppError(DeskError::Authentication(
            "Missing bearer session token".to_string(),
        ))
    })?;

    let session = resolve_session(&state, token).await?;
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
