pub mod admin;
pub mod lesson;
pub mod report;
pub mod session;
pub mod student;
pub mod teacher;

use eyre::Report;
use tutordesk_core::errors::DeskError;

/// Maps a repository insert/update error to a user-visible validation error
/// when it is a unique-constraint violation (duplicate email), and to a
/// generic database error otherwise.
pub(crate) fn map_unique_violation(report: Report, message: &str) -> DeskError {
    let is_unique = report
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
        .unwrap_or(false);

    if is_unique {
        DeskError::Validation(message.to_string())
    } else {
        DeskError::Database(report)
    }
}
