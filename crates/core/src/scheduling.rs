//! # Lesson Scheduling Engine
//!
//! Pure decision logic for lesson bookings: whether a candidate lesson may
//! occupy its (date, time) slot, what it costs, and whether its start is close
//! enough to warrant a last-minute notification.
//!
//! Everything here operates on data the caller has already fetched. The
//! functions perform no I/O, which keeps the create and edit flows on a strict
//! validate-then-write discipline: a conflict is reported before anything is
//! persisted, and a rejected candidate is a normal outcome rather than a fault.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Fixed price table, tiered by participant count.
///
/// One student: 80.00 charged, 40.00 paid out. Two students: 120.00 charged,
/// 60.00 paid out. Prices are derived here and never accepted from a client.
pub const SOLO_PRICE: f64 = 80.0;
pub const SOLO_TEACHER_PAY: f64 = 40.0;
pub const PAIR_PRICE: f64 = 120.0;
pub const PAIR_TEACHER_PAY: f64 = 60.0;

/// How close to its start a lesson write must be to trigger a notification.
pub const SHORT_NOTICE_HOURS: i64 = 24;

/// Why a candidate lesson was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleError {
    #[error("the same student cannot fill both participant slots")]
    DuplicateStudent,

    #[error("the teacher already has a lesson at this date and time")]
    TeacherDoubleBooked,

    #[error("a student already has a lesson at this date and time")]
    StudentDoubleBooked,
}

impl ScheduleError {
    /// Stable machine-readable code, carried in API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ScheduleError::DuplicateStudent => "DUPLICATE_STUDENT",
            ScheduleError::TeacherDoubleBooked => "TEACHER_DOUBLE_BOOKED",
            ScheduleError::StudentDoubleBooked => "STUDENT_DOUBLE_BOOKED",
        }
    }
}

/// A proposed lesson, before validation and pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCandidate {
    pub teacher_id: Uuid,
    pub student1_id: Uuid,
    pub student2_id: Option<Uuid>,
    pub lesson_date: NaiveDate,
    pub lesson_time: NaiveTime,
}

/// An existing lesson occupying the candidate's slot, reduced to the fields
/// the conflict scan needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotLesson {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub student1_id: Uuid,
    pub student2_id: Option<Uuid>,
}

impl SlotLesson {
    fn involves_student(&self, student_id: Uuid) -> bool {
        self.student1_id == student_id || self.student2_id == Some(student_id)
    }
}

/// A validated candidate with its derived prices attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLesson {
    pub teacher_id: Uuid,
    pub student1_id: Uuid,
    pub student2_id: Option<Uuid>,
    pub lesson_date: NaiveDate,
    pub lesson_time: NaiveTime,
    /// Amount charged to the customer.
    pub price: f64,
    /// Amount paid out to the teacher.
    pub teacher_pay: f64,
}

/// Validates a candidate lesson against the other lessons in its slot and, if
/// it is legal, attaches the canonical price pair.
///
/// `same_slot` must be the full set of lessons already booked at the
/// candidate's exact (date, time). When editing an existing lesson, pass its
/// id as `excluding` so the snapshot entry for the lesson itself does not
/// produce a self-conflict.
///
/// Checks run in a fixed order: the duplicate-participant check first, then
/// the teacher collision, then the student collisions. The first violation
/// found is returned; scan order within `same_slot` carries no meaning beyond
/// that.
pub fn validate_and_price(
    candidate: &LessonCandidate,
    same_slot: &[SlotLesson],
    excluding: Option<Uuid>,
) -> Result<PricedLesson, ScheduleError> {
    if candidate.student2_id == Some(candidate.student1_id) {
        return Err(ScheduleError::DuplicateStudent);
    }

    let others = same_slot
        .iter()
        .filter(|lesson| Some(lesson.id) != excluding);

    for lesson in others {
        if lesson.teacher_id == candidate.teacher_id {
            return Err(ScheduleError::TeacherDoubleBooked);
        }
        if lesson.involves_student(candidate.student1_id) {
            return Err(ScheduleError::StudentDoubleBooked);
        }
        if let Some(second) = candidate.student2_id {
            if lesson.involves_student(second) {
                return Err(ScheduleError::StudentDoubleBooked);
            }
        }
    }

    let (price, teacher_pay) = if candidate.student2_id.is_some() {
        (PAIR_PRICE, PAIR_TEACHER_PAY)
    } else {
        (SOLO_PRICE, SOLO_TEACHER_PAY)
    };

    Ok(PricedLesson {
        teacher_id: candidate.teacher_id,
        student1_id: candidate.student1_id,
        student2_id: candidate.student2_id,
        lesson_date: candidate.lesson_date,
        lesson_time: candidate.lesson_time,
        price,
        teacher_pay,
    })
}

/// Combines a lesson's date and time slot into its start instant.
///
/// Slots are stored naive; the service treats them as UTC.
pub fn lesson_start(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// True when `start` lies in the future but less than [`SHORT_NOTICE_HOURS`]
/// away from `now`.
///
/// Gates the post-write notification dispatch only. Past-due starts and
/// far-future starts both return false, and the result never blocks a write.
pub fn needs_short_notice(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let lead = start - now;
    lead >= Duration::zero() && lead < Duration::hours(SHORT_NOTICE_HOURS)
}
