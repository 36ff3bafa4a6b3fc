//! # Lesson Handlers
//!
//! Create, edit, list, and delete lesson bookings. Create and edit follow the
//! same explicit three-step sequence:
//!
//! 1. Fetch the snapshot of lessons already booked at the candidate's
//!    (date, time) slot, plus the referenced teacher and students.
//! 2. Run the pure scheduling engine over the snapshot
//!    ([`validate_and_price`]). A conflict ends the request here, before any
//!    write, with a 409 carrying the specific reason.
//! 3. Commit the priced lesson, then — only if the lesson starts inside the
//!    short-notice window — fire the guardian/teacher messages and calendar
//!    sync as a detached task whose outcome cannot affect the write.
//!
//! Two operators racing for the same slot can both pass step 2; the unique
//! teacher/slot constraint in the store is the remaining net for that race
//! and surfaces as a plain save error.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tutordesk_core::{
    errors::DeskError,
    models::lesson::{Lesson, LessonListEntry, SaveLessonRequest, SaveLessonResponse},
    scheduling::{
        LessonCandidate, PricedLesson, SlotLesson, lesson_start, needs_short_notice,
        validate_and_price,
    },
};
use tutordesk_db::models::{DbLesson, DbStudent, DbTeacher};
use tutordesk_notify::{CalendarAction, CalendarEvent, MessageCategory, message};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Calendar events get a fixed one-hour duration; the store keeps only the
/// start slot.
const LESSON_DURATION_HOURS: i64 = 1;

fn to_lesson(db: DbLesson) -> Lesson {
    Lesson {
        id: db.id,
        teacher_id: db.teacher_id,
        student1_id: db.student1_id,
        student2_id: db.student2_id,
        lesson_date: db.lesson_date,
        lesson_time: db.lesson_time,
        room: db.room,
        price: db.price,
        teacher_pay: db.teacher_pay,
        payment_confirmed: db.payment_confirmed,
        notes: db.notes,
        created_at: db.created_at,
        updated_at: db.updated_at,
    }
}

fn slot_view(db: &DbLesson) -> SlotLesson {
    SlotLesson {
        id: db.id,
        teacher_id: db.teacher_id,
        student1_id: db.student1_id,
        student2_id: db.student2_id,
    }
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}

async fn load_active_teacher(state: &ApiState, id: Uuid) -> Result<DbTeacher, DeskError> {
    let teacher = tutordesk_db::repositories::teacher::get_teacher_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Teacher with ID {} not found", id)))?;

    if !teacher.active {
        return Err(DeskError::Validation(
            "Teacher is inactive and cannot take new lessons".to_string(),
        ));
    }

    Ok(teacher)
}

async fn load_active_student(state: &ApiState, id: Uuid) -> Result<DbStudent, DeskError> {
    let student = tutordesk_db::repositories::student::get_student_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Student with ID {} not found", id)))?;

    if !student.active {
        return Err(DeskError::Validation(
            "Student is inactive and cannot take new lessons".to_string(),
        ));
    }

    Ok(student)
}

/// Steps 1 and 2 of the booking sequence, shared by create and edit.
async fn validate_request(
    state: &ApiState,
    payload: &SaveLessonRequest,
    excluding: Option<Uuid>,
) -> Result<(PricedLesson, DbTeacher, Vec<DbStudent>), DeskError> {
    let teacher = load_active_teacher(state, payload.teacher_id).await?;

    let mut students = vec![load_active_student(state, payload.student1_id).await?];
    if let Some(second) = payload.student2_id {
        students.push(load_active_student(state, second).await?);
    }

    let candidate = LessonCandidate {
        teacher_id: payload.teacher_id,
        student1_id: payload.student1_id,
        student2_id: payload.student2_id,
        lesson_date: payload.lesson_date,
        lesson_time: payload.lesson_time,
    };

    let snapshot = tutordesk_db::repositories::lesson::get_lessons_at_slot(
        &state.db_pool,
        payload.lesson_date,
        payload.lesson_time,
    )
    .await
    .map_err(DeskError::Database)?;

    let same_slot: Vec<SlotLesson> = snapshot.iter().map(slot_view).collect();

    let priced = validate_and_price(&candidate, &same_slot, excluding)?;

    Ok((priced, teacher, students))
}

/// Step 3: fires the outbound messages when the lesson starts within the
/// short-notice window. Returns whether a dispatch was kicked off and the
/// student names it covers.
///
/// The dispatch task is detached on purpose. The lesson write has already
/// committed; a failed send is logged and dropped.
fn dispatch_if_short_notice(
    state: &Arc<ApiState>,
    lesson: &DbLesson,
    teacher: &DbTeacher,
    students: &[DbStudent],
    category: MessageCategory,
    action: CalendarAction,
) -> (bool, Vec<String>) {
    let start = lesson_start(lesson.lesson_date, lesson.lesson_time);
    if !needs_short_notice(start, Utc::now()) {
        return (false, Vec::new());
    }

    let student_names: Vec<String> = students
        .iter()
        .map(|s| full_name(&s.first_name, &s.last_name))
        .collect();
    let teacher_name = full_name(&teacher.first_name, &teacher.last_name);

    let notifier = state.notifier.clone();
    let calendar = state.calendar.clone();
    let date = lesson.lesson_date;
    let time = lesson.lesson_time;
    let teacher_phone = teacher.phone.clone();
    let guardians: Vec<(String, String)> = students
        .iter()
        .map(|s| {
            (
                s.guardian_phone.clone(),
                full_name(&s.first_name, &s.last_name),
            )
        })
        .collect();
    let names = student_names.clone();
    let lesson_id = lesson.id;

    tokio::spawn(async move {
        for (guardian_phone, student_name) in &guardians {
            let text = message::guardian_message(student_name, date, time, category);
            if let Err(err) = notifier.send(guardian_phone, &text, category).await {
                tracing::warn!(lesson_id = %lesson_id, "guardian notification failed: {err:#}");
            }
        }

        let text = message::teacher_message(&teacher_name, &names, date, time, category);
        if let Err(err) = notifier.send(&teacher_phone, &text, category).await {
            tracing::warn!(lesson_id = %lesson_id, "teacher notification failed: {err:#}");
        }

        let start = lesson_start(date, time);
        let event = CalendarEvent {
            summary: message::event_summary(&teacher_name, &names),
            description: format!("Lesson scheduled through TutorDesk ({})", lesson_id),
            start,
            end: start + Duration::hours(LESSON_DURATION_HOURS),
            attendees: names.clone(),
        };
        if let Err(err) = calendar.sync_event(&event, action, None).await {
            tracing::warn!(lesson_id = %lesson_id, "calendar sync failed: {err:#}");
        }
    });

    (true, student_names)
}

#[axum::debug_handler]
pub async fn create_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<SaveLessonRequest>,
) -> Result<Json<SaveLessonResponse>, AppError> {
    let (priced, teacher, students) = validate_request(&state, &payload, None).await?;

    let db_lesson = tutordesk_db::repositories::lesson::create_lesson(
        &state.db_pool,
        &priced,
        payload.room.as_deref(),
        payload.notes.as_deref(),
        payload.payment_confirmed,
    )
    .await
    .map_err(DeskError::Database)?;

    let (notified, notified_students) = dispatch_if_short_notice(
        &state,
        &db_lesson,
        &teacher,
        &students,
        MessageCategory::Created,
        CalendarAction::Create,
    );

    Ok(Json(SaveLessonResponse {
        lesson: to_lesson(db_lesson),
        notified,
        notified_students,
    }))
}

#[axum::debug_handler]
pub async fn update_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SaveLessonRequest>,
) -> Result<Json<SaveLessonResponse>, AppError> {
    // The slot snapshot may contain the lesson being edited; exclusion by id
    // keeps it from conflicting with itself.
    let (priced, teacher, students) = validate_request(&state, &payload, Some(id)).await?;

    let db_lesson = tutordesk_db::repositories::lesson::update_lesson(
        &state.db_pool,
        id,
        &priced,
        payload.room.as_deref(),
        payload.notes.as_deref(),
        payload.payment_confirmed,
    )
    .await
    .map_err(DeskError::Database)?
    .ok_or_else(|| DeskError::NotFound(format!("Lesson with ID {} not found", id)))?;

    let (notified, notified_students) = dispatch_if_short_notice(
        &state,
        &db_lesson,
        &teacher,
        &students,
        MessageCategory::Updated,
        CalendarAction::Update,
    );

    Ok(Json(SaveLessonResponse {
        lesson: to_lesson(db_lesson),
        notified,
        notified_students,
    }))
}

#[axum::debug_handler]
pub async fn get_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let db_lesson = tutordesk_db::repositories::lesson::get_lesson_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Lesson with ID {} not found", id)))?;

    Ok(Json(to_lesson(db_lesson)))
}

#[axum::debug_handler]
pub async fn list_lessons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<LessonListEntry>>, AppError> {
    let rows = tutordesk_db::repositories::lesson::list_lessons(&state.db_pool)
        .await
        .map_err(DeskError::Database)?;

    let entries = rows
        .into_iter()
        .map(|row| LessonListEntry {
            id: row.id,
            lesson_date: row.lesson_date,
            lesson_time: row.lesson_time,
            teacher_name: row.teacher_name,
            student1_name: row.student1_name,
            student2_name: row.student2_name,
            room: row.room,
            price: row.price,
            payment_confirmed: row.payment_confirmed,
        })
        .collect();

    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn delete_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let db_lesson = tutordesk_db::repositories::lesson::get_lesson_by_id(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?
        .ok_or_else(|| DeskError::NotFound(format!("Lesson with ID {} not found", id)))?;

    // Participants are loaded before the row disappears so a last-minute
    // cancellation can still be announced. Inactive participants are fine
    // here; only new bookings require active ones.
    let teacher =
        tutordesk_db::repositories::teacher::get_teacher_by_id(&state.db_pool, db_lesson.teacher_id)
            .await
            .map_err(DeskError::Database)?;

    let mut students = Vec::new();
    for student_id in [Some(db_lesson.student1_id), db_lesson.student2_id]
        .into_iter()
        .flatten()
    {
        if let Some(student) =
            tutordesk_db::repositories::student::get_student_by_id(&state.db_pool, student_id)
                .await
                .map_err(DeskError::Database)?
        {
            students.push(student);
        }
    }

    let deleted = tutordesk_db::repositories::lesson::delete_lesson(&state.db_pool, id)
        .await
        .map_err(DeskError::Database)?;

    if !deleted {
        return Err(AppError(DeskError::NotFound(format!(
            "Lesson with ID {} not found",
            id
        ))));
    }

    if let Some(teacher) = teacher {
        dispatch_if_short_notice(
            &state,
            &db_lesson,
            &teacher,
            &students,
            MessageCategory::Cancelled,
            CalendarAction::Delete,
        );
    }

    Ok(StatusCode::NO_CONTENT)
}
