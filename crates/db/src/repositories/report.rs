use crate::models::DbFinancialSummary;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Aggregates all lessons with `start_date <= lesson_date <= end_date`.
/// Inactive teachers and students stay counted; inactivation never rewrites
/// financial history.
pub async fn financial_summary(
    pool: &Pool<Postgres>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<DbFinancialSummary> {
    let summary = sqlx::query_as::<_, DbFinancialSummary>(
        r#"
        SELECT COUNT(*) AS total_lessons,
               COALESCE(SUM(price), 0) AS revenue,
               COALESCE(SUM(teacher_pay), 0) AS teacher_cost
        FROM lessons
        WHERE lesson_date >= $1 AND lesson_date <= $2
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;

    Ok(summary)
}
