//! Handler-flow tests for the booking sequence, driven through mock
//! repositories: snapshot the slot, validate, and only then write.


use pretty_assertions::assert_eq;
use tutordesk_core::{
    errors::DeskError,
    models::lesson::SaveLessonRequest,
    scheduling::{
        LessonCandidate, SOLO_PRICE, SOLO_TEACHER_PAY, ScheduleError, SlotLesson,
        validate_and_price,
    },
};
use tutordesk_db::models::DbLesson;
use uuid::Uuid;

use test_utils::{
    TestContext, lesson_fixture, lesson_from_priced, slot_date, slot_time, student_fixture,
    teacher_fixture,
};

fn save_request(teacher_id: Uuid, student1_id: Uuid, student2_id: Option<Uuid>) -> SaveLessonRequest {
    SaveLessonRequest {
        teacher_id,
        student1_id,
        student2_id,
        lesson_date: slot_date(),
        lesson_time: slot_time(),
        room: None,
        notes: None,
        payment_confirmed: false,
    }
}

// Mirrors the handler's create flow against the mock repositories: load and
// check participants, snapshot the slot, validate, then (and only then) write.
async fn create_lesson_wrapper(
    ctx: &mut TestContext,
    payload: SaveLessonRequest,
    excluding: Option<Uuid>,
) -> Result<DbLesson, DeskError> {
    let teacher = ctx
        .teacher_repo
        .get_teacher_by_id(payload.teacher_id)
        .await?
        .ok_or_else(|| DeskError::NotFound("Teacher not found".to_string()))?;
    if !teacher.active {
        return Err(DeskError::Validation(
            "Teacher is inactive and cannot take new lessons".to_string(),
        ));
    }

    let mut student_ids = vec![payload.student1_id];
    if let Some(second) = payload.student2_id {
        student_ids.push(second);
    }
    for student_id in student_ids {
        let student = ctx
            .student_repo
            .get_student_by_id(student_id)
            .await?
            .ok_or_else(|| DeskError::NotFound("Student not found".to_string()))?;
        if !student.active {
            return Err(DeskError::Validation(
                "Student is inactive and cannot take new lessons".to_string(),
            ));
        }
    }

    let snapshot = ctx
        .lesson_repo
        .get_lessons_at_slot(payload.lesson_date, payload.lesson_time)
        .await?;
    let same_slot: Vec<SlotLesson> = snapshot
        .iter()
        .map(|l| SlotLesson {
            id: l.id,
            teacher_id: l.teacher_id,
            student1_id: l.student1_id,
            student2_id: l.student2_id,
        })
        .collect();

    let candidate = LessonCandidate {
        teacher_id: payload.teacher_id,
        student1_id: payload.student1_id,
        student2_id: payload.student2_id,
        lesson_date: payload.lesson_date,
        lesson_time: payload.lesson_time,
    };

    let priced = validate_and_price(&candidate, &same_slot, excluding)?;

    let lesson = ctx
        .lesson_repo
        .create_lesson(priced, None, None, payload.payment_confirmed)
        .await?;

    Ok(lesson)
}

#[tokio::test]
async fn booking_a_free_slot_is_accepted_and_priced() {
    let mut ctx = TestContext::new();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, true))));
    ctx.student_repo
        .expect_get_student_by_id()
        .returning(move |id| Ok(Some(student_fixture(id, true))));
    ctx.lesson_repo
        .expect_get_lessons_at_slot()
        .returning(|_, _| Ok(vec![]));
    ctx.lesson_repo
        .expect_create_lesson()
        .withf(|priced, _, _, _| priced.price == SOLO_PRICE && priced.teacher_pay == SOLO_TEACHER_PAY)
        .returning(|priced, _, _, _| Ok(lesson_from_priced(Uuid::new_v4(), &priced)));

    let result = create_lesson_wrapper(&mut ctx, save_request(teacher_id, student_id, None), None)
        .await
        .expect("free slot should book");

    assert_eq!(result.teacher_id, teacher_id);
    assert_eq!(result.price, SOLO_PRICE);
    assert_eq!(result.teacher_pay, SOLO_TEACHER_PAY);
}

#[tokio::test]
async fn teacher_conflict_rejects_before_any_write() {
    let mut ctx = TestContext::new();
    let teacher_id = Uuid::new_v4();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, true))));
    ctx.student_repo
        .expect_get_student_by_id()
        .returning(move |id| Ok(Some(student_fixture(id, true))));
    // The slot already holds a lesson for the same teacher.
    ctx.lesson_repo.expect_get_lessons_at_slot().returning(move |_, _| {
        Ok(vec![lesson_fixture(
            Uuid::new_v4(),
            teacher_id,
            Uuid::new_v4(),
            None,
        )])
    });
    // No create_lesson expectation: a write would panic the mock.

    let result =
        create_lesson_wrapper(&mut ctx, save_request(teacher_id, Uuid::new_v4(), None), None).await;

    assert!(matches!(
        result,
        Err(DeskError::Conflict(ScheduleError::TeacherDoubleBooked))
    ));
}

#[tokio::test]
async fn student_conflict_is_detected_through_the_secondary_slot() {
    let mut ctx = TestContext::new();
    let shared_student = Uuid::new_v4();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, true))));
    ctx.student_repo
        .expect_get_student_by_id()
        .returning(move |id| Ok(Some(student_fixture(id, true))));
    // A different teacher's lesson already involves the shared student.
    ctx.lesson_repo.expect_get_lessons_at_slot().returning(move |_, _| {
        Ok(vec![lesson_fixture(
            Uuid::new_v4(),
            Uuid::new_v4(),
            shared_student,
            None,
        )])
    });

    let result = create_lesson_wrapper(
        &mut ctx,
        save_request(Uuid::new_v4(), Uuid::new_v4(), Some(shared_student)),
        None,
    )
    .await;

    assert!(matches!(
        result,
        Err(DeskError::Conflict(ScheduleError::StudentDoubleBooked))
    ));
}

#[tokio::test]
async fn editing_a_lesson_skips_its_own_snapshot_entry() {
    let mut ctx = TestContext::new();
    let lesson_id = Uuid::new_v4();
    let teacher_id = Uuid::new_v4();
    let student_id = Uuid::new_v4();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, true))));
    ctx.student_repo
        .expect_get_student_by_id()
        .returning(move |id| Ok(Some(student_fixture(id, true))));
    // The snapshot still contains the lesson being edited.
    ctx.lesson_repo.expect_get_lessons_at_slot().returning(move |_, _| {
        Ok(vec![lesson_fixture(lesson_id, teacher_id, student_id, None)])
    });
    ctx.lesson_repo
        .expect_create_lesson()
        .returning(|priced, _, _, _| Ok(lesson_from_priced(Uuid::new_v4(), &priced)));

    let result = create_lesson_wrapper(
        &mut ctx,
        save_request(teacher_id, student_id, None),
        Some(lesson_id),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn inactive_teacher_cannot_take_new_lessons() {
    let mut ctx = TestContext::new();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, false))));

    let result =
        create_lesson_wrapper(&mut ctx, save_request(Uuid::new_v4(), Uuid::new_v4(), None), None)
            .await;

    assert!(matches!(result, Err(DeskError::Validation(_))));
}

#[tokio::test]
async fn duplicate_student_request_is_a_validation_error() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();

    ctx.teacher_repo
        .expect_get_teacher_by_id()
        .returning(move |id| Ok(Some(teacher_fixture(id, true))));
    ctx.student_repo
        .expect_get_student_by_id()
        .returning(move |id| Ok(Some(student_fixture(id, true))));
    ctx.lesson_repo
        .expect_get_lessons_at_slot()
        .returning(|_, _| Ok(vec![]));

    let result = create_lesson_wrapper(
        &mut ctx,
        save_request(Uuid::new_v4(), student_id, Some(student_id)),
        None,
    )
    .await
    .map_err(DeskError::from);

    assert!(matches!(result, Err(DeskError::Validation(_))));
}
