use thiserror::Error;

use crate::scheduling::ScheduleError;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduling conflict: {0}")]
    Conflict(ScheduleError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ScheduleError> for DeskError {
    fn from(err: ScheduleError) -> Self {
        match err {
            // A lesson booked with the same student twice is a malformed
            // request, not a slot collision.
            ScheduleError::DuplicateStudent => DeskError::Validation(err.to_string()),
            _ => DeskError::Conflict(err),
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
