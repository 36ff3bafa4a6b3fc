use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub student1_id: Uuid,
    pub student2_id: Option<Uuid>,
    pub lesson_date: NaiveDate,
    pub lesson_time: NaiveTime,
    pub room: Option<String>,
    pub price: f64,
    pub teacher_pay: f64,
    pub payment_confirmed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List-view row with participant names resolved in SQL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLessonListRow {
    pub id: Uuid,
    pub lesson_date: NaiveDate,
    pub lesson_time: NaiveTime,
    pub teacher_name: String,
    pub student1_name: String,
    pub student2_name: Option<String>,
    pub room: Option<String>,
    pub price: f64,
    pub payment_confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTeacher {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdmin {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: Option<String>,
    pub is_root: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Aggregate row backing the financial report.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFinancialSummary {
    pub total_lessons: i64,
    pub revenue: f64,
    pub teacher_cost: f64,
}
