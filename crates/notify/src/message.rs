//! Message texts for guardian and teacher notifications.

use chrono::{NaiveDate, NaiveTime};

use crate::MessageCategory;

/// Text sent to a student's guardian contact.
pub fn guardian_message(
    student_name: &str,
    date: NaiveDate,
    time: NaiveTime,
    category: MessageCategory,
) -> String {
    let when = format!("{} at {}", date.format("%d/%m/%Y"), time.format("%H:%M"));
    match category {
        MessageCategory::Created => format!(
            "A lesson for {student_name} has been scheduled for {when}."
        ),
        MessageCategory::Updated => format!(
            "The lesson for {student_name} has been rescheduled to {when}."
        ),
        MessageCategory::Cancelled => format!(
            "The lesson for {student_name} on {when} has been cancelled."
        ),
    }
}

/// Text sent to the teacher.
pub fn teacher_message(
    teacher_name: &str,
    student_names: &[String],
    date: NaiveDate,
    time: NaiveTime,
    category: MessageCategory,
) -> String {
    let when = format!("{} at {}", date.format("%d/%m/%Y"), time.format("%H:%M"));
    let students = student_names.join(", ");
    match category {
        MessageCategory::Created => format!(
            "{teacher_name}, you have a new lesson with {students} on {when}."
        ),
        MessageCategory::Updated => format!(
            "{teacher_name}, your lesson with {students} has been moved to {when}."
        ),
        MessageCategory::Cancelled => format!(
            "{teacher_name}, your lesson with {students} on {when} has been cancelled."
        ),
    }
}

/// One-line calendar event summary.
pub fn event_summary(teacher_name: &str, student_names: &[String]) -> String {
    format!("Lesson: {} with {}", teacher_name, student_names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn slot() -> (NaiveDate, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn guardian_message_mentions_student_and_slot() {
        let (date, time) = slot();
        let msg = guardian_message("Ana Souza", date, time, MessageCategory::Created);
        assert_eq!(
            msg,
            "A lesson for Ana Souza has been scheduled for 01/06/2024 at 10:00."
        );
    }

    #[test]
    fn cancelled_message_reads_as_cancellation() {
        let (date, time) = slot();
        let msg = guardian_message("Ana Souza", date, time, MessageCategory::Cancelled);
        assert!(msg.contains("cancelled"));
        assert!(msg.contains("01/06/2024"));
    }

    #[test]
    fn teacher_message_lists_all_students() {
        let (date, time) = slot();
        let students = vec!["Ana Souza".to_string(), "Bruno Lima".to_string()];
        let msg = teacher_message("Carla Dias", &students, date, time, MessageCategory::Updated);
        assert!(msg.contains("Ana Souza, Bruno Lima"));
        assert!(msg.starts_with("Carla Dias"));
    }

    #[test]
    fn event_summary_names_everyone() {
        let students = vec!["Ana Souza".to_string()];
        assert_eq!(
            event_summary("Carla Dias", &students),
            "Lesson: Carla Dias with Ana Souza"
        );
    }
}
