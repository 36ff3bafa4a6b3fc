use pretty_assertions::assert_eq;
use tutordesk_core::errors::DeskError;
use tutordesk_core::scheduling::ScheduleError;

#[test]
fn test_error_display_messages() {
    let not_found = DeskError::NotFound("Lesson with ID 42 not found".to_string());
    assert_eq!(
        not_found.to_string(),
        "Resource not found: Lesson with ID 42 not found"
    );

    let validation = DeskError::Validation("E-mail already registered".to_string());
    assert_eq!(
        validation.to_string(),
        "Validation error: E-mail already registered"
    );

    let auth = DeskError::Authentication("Invalid e-mail or password".to_string());
    assert_eq!(
        auth.to_string(),
        "Authentication error: Invalid e-mail or password"
    );
}

#[test]
fn conflict_display_carries_the_reason() {
    let conflict = DeskError::Conflict(ScheduleError::TeacherDoubleBooked);
    assert_eq!(
        conflict.to_string(),
        "Scheduling conflict: the teacher already has a lesson at this date and time"
    );
}

#[test]
fn schedule_errors_convert_by_kind() {
    // Slot collisions become conflicts...
    assert!(matches!(
        DeskError::from(ScheduleError::TeacherDoubleBooked),
        DeskError::Conflict(ScheduleError::TeacherDoubleBooked)
    ));
    assert!(matches!(
        DeskError::from(ScheduleError::StudentDoubleBooked),
        DeskError::Conflict(ScheduleError::StudentDoubleBooked)
    ));

    // ...but a duplicated participant is a malformed request.
    assert!(matches!(
        DeskError::from(ScheduleError::DuplicateStudent),
        DeskError::Validation(_)
    ));
}

#[test]
fn test_database_error_from_eyre() {
    let report = eyre::eyre!("connection refused");
    let err = DeskError::from(report);

    assert!(matches!(err, DeskError::Database(_)));
    assert!(err.to_string().contains("connection refused"));
}
