use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tutordesk_core::scheduling::{
    LessonCandidate, PAIR_PRICE, PAIR_TEACHER_PAY, SOLO_PRICE, SOLO_TEACHER_PAY, ScheduleError,
    SlotLesson, lesson_start, needs_short_notice, validate_and_price,
};
use uuid::Uuid;

fn candidate(teacher: Uuid, s1: Uuid, s2: Option<Uuid>) -> LessonCandidate {
    LessonCandidate {
        teacher_id: teacher,
        student1_id: s1,
        student2_id: s2,
        lesson_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        lesson_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    }
}

fn existing(teacher: Uuid, s1: Uuid, s2: Option<Uuid>) -> SlotLesson {
    SlotLesson {
        id: Uuid::new_v4(),
        teacher_id: teacher,
        student1_id: s1,
        student2_id: s2,
    }
}

#[test]
fn free_slot_is_accepted() {
    let teacher = Uuid::new_v4();
    let student = Uuid::new_v4();

    let priced = validate_and_price(&candidate(teacher, student, None), &[], None)
        .expect("free slot should be accepted");

    assert_eq!(priced.teacher_id, teacher);
    assert_eq!(priced.student1_id, student);
    assert_eq!(priced.price, SOLO_PRICE);
    assert_eq!(priced.teacher_pay, SOLO_TEACHER_PAY);
}

#[test]
fn same_teacher_in_slot_is_rejected() {
    // Teacher T has a lesson at 2024-06-01 10:00 with student A; a new
    // lesson for T at the same slot with student B must be rejected.
    let teacher = Uuid::new_v4();
    let student_a = Uuid::new_v4();
    let student_b = Uuid::new_v4();

    let slot = vec![existing(teacher, student_a, None)];
    let result = validate_and_price(&candidate(teacher, student_b, None), &slot, None);

    assert_eq!(result, Err(ScheduleError::TeacherDoubleBooked));
}

#[rstest]
// candidate primary vs existing primary
#[case(true, false)]
// candidate primary vs existing secondary
#[case(true, true)]
// candidate secondary vs existing primary
#[case(false, false)]
// candidate secondary vs existing secondary
#[case(false, true)]
fn shared_student_in_slot_is_rejected(
    #[case] shared_is_candidate_primary: bool,
    #[case] shared_is_existing_secondary: bool,
) {
    let shared = Uuid::new_v4();
    let other = Uuid::new_v4();

    let existing_lesson = if shared_is_existing_secondary {
        existing(Uuid::new_v4(), Uuid::new_v4(), Some(shared))
    } else {
        existing(Uuid::new_v4(), shared, None)
    };

    let cand = if shared_is_candidate_primary {
        candidate(Uuid::new_v4(), shared, Some(other))
    } else {
        candidate(Uuid::new_v4(), other, Some(shared))
    };

    let result = validate_and_price(&cand, &[existing_lesson], None);
    assert_eq!(result, Err(ScheduleError::StudentDoubleBooked));
}

#[test]
fn duplicate_student_is_rejected_before_the_conflict_scan() {
    let teacher = Uuid::new_v4();
    let student = Uuid::new_v4();

    // The slot also holds a teacher conflict; the duplicate-participant check
    // must win because it runs first.
    let slot = vec![existing(teacher, Uuid::new_v4(), None)];
    let result = validate_and_price(&candidate(teacher, student, Some(student)), &slot, None);

    assert_eq!(result, Err(ScheduleError::DuplicateStudent));
}

#[test]
fn teacher_check_precedes_student_check() {
    let teacher = Uuid::new_v4();
    let student = Uuid::new_v4();

    // The existing lesson shares both the teacher and the student.
    let slot = vec![existing(teacher, student, None)];
    let result = validate_and_price(&candidate(teacher, student, None), &slot, None);

    assert_eq!(result, Err(ScheduleError::TeacherDoubleBooked));
}

#[test]
fn editing_a_lesson_does_not_conflict_with_itself() {
    let teacher = Uuid::new_v4();
    let student = Uuid::new_v4();

    let own = existing(teacher, student, None);
    let own_id = own.id;

    // Unedited snapshot still contains the lesson being edited.
    let result = validate_and_price(&candidate(teacher, student, None), &[own], Some(own_id));

    assert!(result.is_ok());
}

#[test]
fn exclusion_only_skips_the_edited_lesson() {
    let teacher = Uuid::new_v4();

    let own = existing(teacher, Uuid::new_v4(), None);
    let own_id = own.id;
    let other = existing(teacher, Uuid::new_v4(), None);

    let result = validate_and_price(
        &candidate(teacher, Uuid::new_v4(), None),
        &[own, other],
        Some(own_id),
    );

    assert_eq!(result, Err(ScheduleError::TeacherDoubleBooked));
}

#[rstest]
#[case(None, SOLO_PRICE, SOLO_TEACHER_PAY)]
#[case(Some(Uuid::new_v4()), PAIR_PRICE, PAIR_TEACHER_PAY)]
fn price_is_a_function_of_participant_count(
    #[case] second: Option<Uuid>,
    #[case] expected_price: f64,
    #[case] expected_pay: f64,
) {
    let priced = validate_and_price(
        &candidate(Uuid::new_v4(), Uuid::new_v4(), second),
        &[],
        None,
    )
    .expect("free slot should be accepted");

    assert_eq!(priced.price, expected_price);
    assert_eq!(priced.teacher_pay, expected_pay);
}

#[test]
fn price_tiers_are_distinct_and_ordered() {
    assert!(PAIR_PRICE > SOLO_PRICE);
    assert!(PAIR_TEACHER_PAY > SOLO_TEACHER_PAY);
    assert!(PAIR_TEACHER_PAY < PAIR_PRICE);
    assert_eq!(SOLO_TEACHER_PAY, SOLO_PRICE / 2.0);
}

#[rstest]
#[case(3, true)] // starts in 3 hours
#[case(48, false)] // starts in 48 hours
#[case(0, true)] // starting right now
#[case(23, true)]
#[case(24, false)] // window is half-open
#[case(-1, false)] // already started
fn short_notice_window_is_zero_to_24_hours(#[case] hours_ahead: i64, #[case] expected: bool) {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let start = now + Duration::hours(hours_ahead);

    assert_eq!(needs_short_notice(start, now), expected);
}

#[test]
fn lesson_start_combines_date_and_slot_as_utc() {
    let start = lesson_start(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    );

    assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
}

#[test]
fn conflict_codes_are_stable() {
    assert_eq!(ScheduleError::DuplicateStudent.code(), "DUPLICATE_STUDENT");
    assert_eq!(
        ScheduleError::TeacherDoubleBooked.code(),
        "TEACHER_DOUBLE_BOOKED"
    );
    assert_eq!(
        ScheduleError::StudentDoubleBooked.code(),
        "STUDENT_DOUBLE_BOOKED"
    );
}
