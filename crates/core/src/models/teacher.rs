use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
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

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
}
