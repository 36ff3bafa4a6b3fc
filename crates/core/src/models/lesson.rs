use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
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

/// Prices are absent on purpose: they are derived from the participant count
/// by the scheduling engine, never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLessonRequest {
    pub teacher_id: Uuid,
    pub student1_id: Uuid,
    pub student2_id: Option<Uuid>,
    pub lesson_date: NaiveDate,
    pub lesson_time: NaiveTime,
    pub room: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLessonResponse {
    pub lesson: Lesson,
    /// True when the lesson starts within the short-notice window and the
    /// guardian/teacher dispatch was kicked off.
    pub notified: bool,
    pub notified_students: Vec<String>,
}

/// List row with participant names resolved, for the lessons table view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonListEntry {
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
