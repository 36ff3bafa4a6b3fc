use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::student::{SaveStudentRequest, Student},
};
use tutordesk_db::models::DbStudent;
use uuid::Uuid;

use crate::{ApiState, handlers::map_unique_violation, middleware::error_handling::AppError};

fn to_student(db: DbStudent) -> Student {
    Student {
        id: db.id,
        first_name: db.first_name,
        last_name: db.last_name,
        birth_date: db.birth_date,
        email: db.email,
        phone: db.phone,
        guardian_name: db.guardian_name,
        guardian_phone: db.guardian_phone,
        address: db.address,
        active: db.active,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `?active=true` restricts to students eligible for new lessons.
    pub active: Option<bool>,
}

#[axum::debug_handler]
pub async fn create_student(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SaveStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let db_student = tutordesk_db::repositories::student::create_student(&state.db_pool, &payload)
        .await
        .map_err(|e| map_unique_violation(e, "E-mail already registered"))?;

    Ok(Json(to_student(db_student)))
}

#[axum::debug_handler]
pub async fn get_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let db_student = tutordesk_db::repositories::student::get_student_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Student with ID {} not found", id)))?;

    Ok(Json(to_student(db_student)))
}

#[axum::debug_handler]
pub async fn list_students(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Student>>, AppError> {
    let active_only = query.active.unwrap_or(false);

    let students = tutordesk_db::repositories::student::list_students(&state.db_pool, active_only)
        .await
        .map_err(DeskError::Database)?;

    Ok(Json(students.into_iter().map(to_student).collect()))
}

#[axum::debug_handler]
pub async fn update_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let db_student =
        tutordesk_db::repositories::student::update_student(&state.db_pool, id, &payload)
            .await
            .map_err(|e| map_unique_violation(e, "E-mail already registered"))?
            .ok_or_else(|| DeskError::NotFound(format!("Student with ID {} not found", id)))?;

    Ok(Json(to_student(db_student)))
}

/// Inactivation replaces deletion: existing lessons and report history keep
/// referencing the student; only new bookings are blocked.
#[axum::debug_handler]
pub async fn inactivate_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let db_student =
        tutordesk_db::repositories::student::set_student_active(&state.db_pool, id, false)
            .await
            .map_err(DeskError::Database)?
            .ok_or_else(|| DeskError::NotFound(format!("Student with ID {} not found", id)))?;

    Ok(Json(to_student(db_student)))
}
