use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::teacher::{SaveTeacherRequest, Teacher},
};
use tutordesk_db::models::DbTeacher;
use uuid::Uuid;

use crate::{ApiState, handlers::map_unique_violation, middleware::error_handling::AppError};

fn to_teacher(db: DbTeacher) -> Teacher {
    Teacher {
        id: db.id,
        first_name: db.first_name,
        last_name: db.last_name,
        tax_id: db.tax_id,
        birth_date: db.birth_date,
        email: db.email,
        phone: db.phone,
        address: db.address,
        active: db.active,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `?active=true` restricts to teachers eligible for new lessons.
    pub active: Option<bool>,
}

#[axum::debug_handler]
pub async fn create_teacher(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SaveTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    let db_teacher = tutordesk_db::repositories::teacher::create_teacher(&state.db_pool, &payload)
        .await
        .map_err(|e| map_unique_violation(e, "E-mail already registered"))?;

    Ok(Json(to_teacher(db_teacher)))
}

#[axum::debug_handler]
pub async fn get_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let db_teacher = tutordesk_db::repositories::teacher::get_teacher_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Teacher with ID {} not found", id)))?;

    Ok(Json(to_teacher(db_teacher)))
}

#[axum::debug_handler]
pub async fn list_teachers(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let active_only = query.active.unwrap_or(false);

    let teachers = tutordesk_db::repositories::teacher::list_teachers(&state.db_pool, active_only)
        .await
        .map_err(DeskError::Database)?;

    Ok(Json(teachers.into_iter().map(to_teacher).collect()))
}

#[axum::debug_handler]
pub async fn update_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    let db_teacher =
        tutordesk_db::repositories::teacher::update_teacher(&state.db_pool, id, &payload)
            .await
            .map_err(|e| map_unique_violation(e, "E-mail already registered"))?
            .ok_or_else(|| DeskError::NotFound(format!("Teacher with ID {} not found", id)))?;

    Ok(Json(to_teacher(db_teacher)))
}

/// Inactivation replaces deletion for reference data: the teacher drops out
/// of the eligible set for new lessons while existing lessons and report
/// history stay intact.
#[axum::debug_handler]
pub async fn inactivate_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    let db_teacher =
        tutordesk_db::repositories::teacher::set_teacher_active(&state.db_pool, id, false)
            .await
            .map_err(DeskError::Database)?
            .ok_or_else(|| DeskError::NotFound(format!("Teacher with ID {} not found", id)))?;

    Ok(Json(to_teacher(db_teacher)))
}
