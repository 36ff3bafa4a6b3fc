use crate::models::DbTeacher;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tutordesk_core::models::teacher::SaveTeacherRequest;
use uuid::Uuid;

pub async fn create_teacher(pool: &Pool<Postgres>, req: &SaveTeacherRequest) -> Result<DbTeacher> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating teacher: id={}, email={}", id, req.email);

    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        INSERT INTO teachers (id, first_name, last_name, tax_id, birth_date, email, phone, address,
                              active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $9)
        RETURNING id, first_name, last_name, tax_id, birth_date, email, phone, address, active,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.tax_id)
    .bind(req.birth_date)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(req.address.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(teacher)
}

pub async fn get_teacher_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTeacher>> {
    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, first_name, last_name, tax_id, birth_date, email, phone, address, active,
               created_at, updated_at
        FROM teachers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}

/// With `active_only`, returns the set eligible for new lessons.
pub async fn list_teachers(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<DbTeacher>> {
    let teachers = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, first_name, last_name, tax_id, birth_date, email, phone, address, active,
               created_at, updated_at
        FROM teachers
        WHERE active OR NOT $1
        ORDER BY first_name ASC, last_name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}

pub async fn update_teacher(
    pool: &Pool<Postgres>,
    id: Uuid,
    req: &SaveTeacherRequest,
) -> Result<Option<DbTeacher>> {
    let now = Utc::now();

    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        UPDATE teachers
        SET first_name = $2, last_name = $3, tax_id = $4, birth_date = $5, email = $6,
            phone = $7, address = $8, updated_at = $9
        WHERE id = $1
        RETURNING id, first_name, last_name, tax_id, birth_date, email, phone, address, active,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.tax_id)
    .bind(req.birth_date)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(req.address.as_deref())
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}

/// Inactivation only removes the teacher from the eligible set for new
/// lessons; existing lessons are left untouched.
pub async fn set_teacher_active(
    pool: &Pool<Postgres>,
    id: Uuid,
    active: bool,
) -> Result<Option<DbTeacher>> {
    let now = Utc::now();

    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        UPDATE teachers
        SET active = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, first_name, last_name, tax_id, birth_date, email, phone, address, active,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(active)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}
