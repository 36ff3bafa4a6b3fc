//! Admin account management. Mutating operations require a root session; the
//! root account itself can never be inactivated.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::admin::{Admin, SaveAdminRequest, Session},
};
use tutordesk_db::models::DbAdmin;
use uuid::Uuid;

use crate::{
    ApiState,
    handlers::map_unique_violation,
    middleware::{auth, error_handling::AppError},
};

fn to_admin(db: DbAdmin) -> Admin {
    Admin {
        id: db.id,
        first_name: db.first_name,
        last_name: db.last_name,
        email: db.email,
        phone: db.phone,
        password_hash: db.password_hash,
        is_root: db.is_root,
        active: db.active,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

fn require_root(session: &Session) -> Result<(), DeskError> {
    if session.is_root {
        Ok(())
    } else {
        Err(DeskError::Authorization(
            "Only the root admin can manage admin accounts".to_string(),
        ))
    }
}

#[axum::debug_handler]
pub async fn create_admin(
    State(state): State<Arc<ApiState>>,
    Extension(session): Extension<Session>,
    Json(payload): Json<SaveAdminRequest>,
) -> Result<Json<Admin>, AppError> {
    require_root(&session)?;

    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let db_admin = tutordesk_db::repositories::admin::create_admin(
        &state.db_pool,
        &payload,
        password_hash.as_deref(),
        false,
    )
    .await
    .map_err(|e| map_unique_violation(e, "E-mail already registered"))?;

    Ok(Json(to_admin(db_admin)))
}

#[axum::debug_handler]
pub async fn list_admins(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = tutordesk_db::repositories::admin::list_admins(&state.db_pool)
        .await
        .map_err(DeskError::Database)?;

    Ok(Json(admins.into_iter().map(to_admin).collect()))
}

#[axum::debug_handler]
pub async fn update_admin(
    State(state): State<Arc<ApiState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveAdminRequest>,
) -> Result<Json<Admin>, AppError> {
    // Admins may edit their own record; everything else is root-only.
    if session.admin_id != id {
        require_root(&session)?;
    }

    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(auth::hash_password(password)?),
        None => None,
    };

    let db_admin = tutordesk_db::repositories::admin::update_admin(
        &state.db_pool,
        id,
        &payload,
        password_hash.as_deref(),
    )
    .await
    .map_err(|e| map_unique_violation(e, "E-mail already registered"))?
    .ok_or_else(|| DeskError::NotFound(format!("Admin with ID {} not found", id)))?;

    Ok(Json(to_admin(db_admin)))
}

#[axum::debug_handler]
pub async fn inactivate_admin(
    State(state): State<Arc<ApiState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Admin>, AppError> {
    require_root(&session)?;

    let target = tutordesk_db::repositories::admin::get_admin_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Admin with ID {} not found", id)))?;

    if target.is_root {
        return Err(AppError(DeskError::Authorization(
            "The root admin cannot be inactivated".to_string(),
        )));
    }

    let db_admin = tutordesk_db::repositories::admin::set_admin_active(&state.db_pool, id, false)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Admin with ID {} not found", id)))?;

    Ok(Json(to_admin(db_admin)))
}
