use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Date-ranged aggregate over lessons: revenue is the sum of customer prices,
/// teacher cost the sum of payouts, profit the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub total_lessons: i64,
    pub revenue: f64,
    pub teacher_cost: f64,
    pub profit: f64,
}
