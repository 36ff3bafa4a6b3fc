use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use tutordesk_core::models::{
    admin::{Admin, LoginRequest},
    lesson::{Lesson, SaveLessonRequest},
    report::FinancialReport,
    student::Student,
    teacher::Teacher,
};
use uuid::Uuid;

#[test]
fn test_lesson_serialization() {
    let now = Utc::now();

    let lesson = Lesson {
        id: Uuid::new_v4(),
        teacher_id: Uuid::new_v4(),
        student1_id: Uuid::new_v4(),
        student2_id: Some(Uuid::new_v4()),
        lesson_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        lesson_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        room: Some("Room 2".to_string()),
        price: 120.0,
        teacher_pay: 60.0,
        payment_confirmed: false,
        notes: None,
        created_at: now,
        updated_at: now,
    };

    let json = to_string(&lesson).expect("Failed to serialize lesson");
    let deserialized: Lesson = from_str(&json).expect("Failed to deserialize lesson");

    assert_eq!(deserialized.id, lesson.id);
    assert_eq!(deserialized.teacher_id, lesson.teacher_id);
    assert_eq!(deserialized.student2_id, lesson.student2_id);
    assert_eq!(deserialized.lesson_date, lesson.lesson_date);
    assert_eq!(deserialized.lesson_time, lesson.lesson_time);
    assert_eq!(deserialized.price, lesson.price);
    assert_eq!(deserialized.teacher_pay, lesson.teacher_pay);
}

#[test]
fn test_teacher_serialization() {
    let now = Utc::now();

    let teacher = Teacher {
        id: Uuid::new_v4(),
        first_name: "Carla".to_string(),
        last_name: "Dias".to_string(),
        tax_id: "12345678900".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 3, 14).unwrap(),
        email: "carla@example.com".to_string(),
        phone: "+55 11 90000-0000".to_string(),
        address: None,
        active: true,
        created_at: now,
        updated_at: now,
    };

    let json = to_string(&teacher).expect("Failed to serialize teacher");
    let deserialized: Teacher = from_str(&json).expect("Failed to deserialize teacher");

    assert_eq!(deserialized.id, teacher.id);
    assert_eq!(deserialized.email, teacher.email);
    assert_eq!(deserialized.active, teacher.active);
    assert_eq!(deserialized.full_name(), "Carla Dias");
}

#[test]
fn test_student_serialization() {
    let now = Utc::now();

    let student = Student {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "Souza".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2010, 8, 20).unwrap(),
        email: "ana@example.com".to_string(),
        phone: "+55 11 91111-1111".to_string(),
        guardian_name: "Paula Souza".to_string(),
        guardian_phone: "+55 11 92222-2222".to_string(),
        address: Some("Rua A, 10".to_string()),
        active: true,
        created_at: now,
        updated_at: now,
    };

    let json = to_string(&student).expect("Failed to serialize student");
    let deserialized: Student = from_str(&json).expect("Failed to deserialize student");

    assert_eq!(deserialized.guardian_name, student.guardian_name);
    assert_eq!(deserialized.guardian_phone, student.guardian_phone);
    assert_eq!(deserialized.full_name(), "Ana Souza");
}

#[test]
fn admin_password_hash_is_never_serialized() {
    let now = Utc::now();

    let admin = Admin {
        id: Uuid::new_v4(),
        first_name: "Base".to_string(),
        last_name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        phone: String::new(),
        password_hash: Some("$argon2id$v=19$secret".to_string()),
        is_root: true,
        active: true,
        created_at: now,
        updated_at: now,
    };

    let json = to_string(&admin).expect("Failed to serialize admin");

    assert!(!json.contains("password_hash"));
    assert!(!json.contains("argon2id"));

    let deserialized: Admin = from_str(&json).expect("Failed to deserialize admin");
    assert_eq!(deserialized.password_hash, None);
    assert_eq!(deserialized.email, admin.email);
}

#[rstest]
#[case(None, false)]
#[case(Some("Room 1"), true)]
fn test_save_lesson_request(#[case] room: Option<&str>, #[case] payment_confirmed: bool) {
    let request = SaveLessonRequest {
        teacher_id: Uuid::new_v4(),
        student1_id: Uuid::new_v4(),
        student2_id: None,
        lesson_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        lesson_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        room: room.map(|r| r.to_string()),
        notes: None,
        payment_confirmed,
    };

    let json = to_string(&request).expect("Failed to serialize save lesson request");
    let deserialized: SaveLessonRequest =
        from_str(&json).expect("Failed to deserialize save lesson request");

    assert_eq!(deserialized.teacher_id, request.teacher_id);
    assert_eq!(deserialized.room, request.room);
    assert_eq!(deserialized.payment_confirmed, request.payment_confirmed);
}

#[test]
fn save_lesson_request_payment_flag_defaults_to_false() {
    let json = format!(
        r#"{{"teacher_id":"{}","student1_id":"{}","lesson_date":"2024-06-01","lesson_time":"10:00:00"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );

    let request: SaveLessonRequest = from_str(&json).expect("Failed to deserialize");

    assert!(!request.payment_confirmed);
    assert_eq!(request.student2_id, None);
    assert_eq!(request.room, None);
}

#[test]
fn test_login_request_serialization() {
    let request = LoginRequest {
        email: "admin@example.com".to_string(),
        password: "secret".to_string(),
    };

    let json = to_string(&request).expect("Failed to serialize login request");
    let deserialized: LoginRequest = from_str(&json).expect("Failed to deserialize login request");

    assert_eq!(deserialized.email, request.email);
    assert_eq!(deserialized.password, request.password);
}

#[test]
fn test_financial_report_serialization() {
    let report = FinancialReport {
        total_lessons: 12,
        revenue: 1160.0,
        teacher_cost: 580.0,
        profit: 580.0,
    };

    let json = to_string(&report).expect("Failed to serialize report");
    let deserialized: FinancialReport = from_str(&json).expect("Failed to deserialize report");

    assert_eq!(deserialized, report);
}
