use crate::models::DbStudent;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tutordesk_core::models::student::SaveStudentRequest;
use uuid::Uuid;

pub async fn create_student(pool: &Pool<Postgres>, req: &SaveStudentRequest) -> Result<DbStudent> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating student: id={}, email={}", id, req.email);

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        INSERT INTO students (id, first_name, last_name, birth_date, email, phone, guardian_name,
                              guardian_phone, address, active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, $10, $10)
        RETURNING id, first_name, last_name, birth_date, email, phone, guardian_name,
                  guardian_phone, address, active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(req.birth_date)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.guardian_name)
    .bind(&req.guardian_phone)
    .bind(req.address.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(student)
}

pub async fn get_student_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbStudent>> {
    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, first_name, last_name, birth_date, email, phone, guardian_name,
               guardian_phone, address, active, created_at, updated_at
        FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

/// With `active_only`, returns the set eligible for new lessons.
pub async fn list_students(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<DbStudent>> {
    let students = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, first_name, last_name, birth_date, email, phone, guardian_name,
               guardian_phone, address, active, created_at, updated_at
        FROM students
        WHERE active OR NOT $1
        ORDER BY first_name ASC, last_name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(students)
}

pub async fn update_student(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: &SaveStudentRequest,
) -> Result<Option<DbStudent>> {
    let now = Utc::now();

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        UPDATE students
        SET first_name = $2, last_name = $3, birth_date = $4, email = $5, phone = $6,
            guardian_name = $7, guardian_phone = $8, address = $9, updated_at = $10
        WHERE id = $1
        RETURNING id, first_name, last_name, birth_date, email, phone, guardian_name,
                  guardian_phone, address, active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(req.birth_date)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.guardian_name)
    .bind(&req.guardian_phone)
    .bind(req.address.as_deref())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}

/// Inactivation only removes the student from the eligible set for new
/// lessons; existing lessons are left untouched.
pub async fn set_student_active(
    pool: &Pool<Postgres>,
    id: Uuid,
    active: bool,
) -> Result<Option<DbStudent>> {
    let now = Utc::now();

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        UPDATE students
        SET active = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, first_name, last_name, birth_date, email, phone, guardian_name,
                  guardian_phone, address, active, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(active)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(student)
}
