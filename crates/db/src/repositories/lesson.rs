use crate::models::{DbLesson, DbLessonListRow};
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use tutordesk_core::scheduling::PricedLesson;
use uuid::Uuid;

const LESSON_COLUMNS: &str = "id, teacher_id, student1_id, student2_id, lesson_date, lesson_time, \
     room, price, teacher_pay, payment_confirmed, notes, created_at, updated_at";

pub async fn create_lesson(
    pool: &Pool<Postgres>,
    priced: &PricedLesson,
    room: Option<&str>,
    notes: Option<&str>,
    payment_confirmed: bool,
) -> Result<DbLesson> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating lesson: id={}, teacher={}, date={}, time={}",
        id,
        priced.teacher_id,
        priced.lesson_date,
        priced.lesson_time
    );

    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        INSERT INTO lessons (id, teacher_id, student1_id, student2_id, lesson_date, lesson_time,
                             room, price, teacher_pay, payment_confirmed, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
        RETURNING {LESSON_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(priced.teacher_id)
    .bind(priced.student1_id)
    .bind(priced.student2_id)
    .bind(priced.lesson_date)
    .bind(priced.lesson_time)
    .bind(room)
    .bind(priced.price)
    .bind(priced.teacher_pay)
    .bind(payment_confirmed)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(lesson)
}

pub async fn get_lesson_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbLesson>> {
    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        SELECT {LESSON_COLUMNS}
        FROM lessons
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(lesson)
}

/// Snapshot of every lesson booked at the exact (date, time) slot. This is the
/// input the conflict scan runs against.
pub async fn get_lessons_at_slot(
    pool: &Pool<Postgres>,
    lesson_date: NaiveDate,
    lesson_time: NaiveTime,
) -> Result<Vec<DbLesson>> {
    let lessons = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        SELECT {LESSON_COLUMNS}
        FROM lessons
        WHERE lesson_date = $1 AND lesson_time = $2
        "#
    ))
    .bind(lesson_date)
    .bind(lesson_time)
    .fetch_all(pool)
    .await?;

    Ok(lessons)
}

pub async fn list_lessons(pool: &Pool<Postgres>) -> Result<Vec<DbLessonListRow>> {
    let lessons = sqlx::query_as::<_, DbLessonListRow>(
        r#"
        SELECT l.id, l.lesson_date, l.lesson_time,
               t.first_name || ' ' || t.last_name AS teacher_name,
               s1.first_name || ' ' || s1.last_name AS student1_name,
               s2.first_name || ' ' || s2.last_name AS student2_name,
               l.room, l.price, l.payment_confirmed
        FROM lessons l
        JOIN teachers t ON t.id = l.teacher_id
        JOIN students s1 ON s1.id = l.student1_id
        LEFT JOIN students s2 ON s2.id = l.student2_id
        ORDER BY l.lesson_date DESC, l.lesson_time DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(lessons)
}

pub async fn update_lesson(
    pool: &Pool<Postgres>,
    id: Uuid,
    priced: &PricedLesson,
    room: Option<&str>,
    notes: Option<&str>,
    payment_confirmed: bool,
) -> Result<Option<DbLesson>> {
    let now = Utc::now();

    tracing::debug!("Updating lesson: id={}", id);

    let lesson = sqlx::query_as::<_, DbLesson>(&format!(
        r#"
        UPDATE lessons
        SET teacher_id = $2, student1_id = $3, student2_id = $4, lesson_date = $5,
            lesson_time = $6, room = $7, price = $8, teacher_pay = $9,
            payment_confirmed = $10, notes = $11, updated_at = $12
        WHERE id = $1
        RETURNING {LESSON_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(priced.teacher_id)
    .bind(priced.student1_id)
    .bind(priced.student2_id)
    .bind(priced.lesson_date)
    .bind(priced.lesson_time)
    .bind(room)
    .bind(priced.price)
    .bind(priced.teacher_pay)
    .bind(payment_confirmed)
    .bind(notes)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(lesson)
}

/// Deletion is permanent; there is no soft-cancel state on lessons.
pub async fn delete_lesson(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM lessons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
