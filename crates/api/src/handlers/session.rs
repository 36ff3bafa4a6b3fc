//! Login and logout. A successful login stores an opaque token server-side
//! and returns it with its expiry; logout revokes the presented token.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::AUTHORIZATION},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::admin::{LoginRequest, LoginResponse},
};

use crate::{ApiState, middleware::auth, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let admin = tutordesk_db::repositories::admin::verify_password(
        &state.db_pool,
        &payload.email,
        &payload.password,
    )
    .await
    .map_err(DeskError::Database)?
    .ok_or_else(|| DeskError::Authentication("Invalid e-mail or password".to_string()))?;

    let token = auth::generate_session_token();
    let expires_at = Utc::now() + Duration::hours(state.session_ttl_hours);

    let session = tutordesk_db::repositories::session::create_session(
        &state.db_pool,
        &token,
        admin.id,
        expires_at,
    )
    .await
    .map_err(DeskError::Database)?;

    tracing::info!("Admin logged in: {}", admin.email);

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        admin_id: admin.id,
        admin_name: format!("{} {}", admin.first_name, admin.last_name),
        is_root: admin.is_root,
    }))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: axum::http::HeaderMap,
) -> Result<StatusCode, AppError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let token = auth::bearer_token(header).ok_or_else(|| {
        AppError(DeskError::Authentication(
            "Missing bearer session token".to_string(),
        ))
    })?;

    tutordesk_db::repositories::session::delete_session(&state.db_pool, token)
        .await
        .map_err(DeskError::Database)?;

    Ok(StatusCode::NO_CONTENT)
}
