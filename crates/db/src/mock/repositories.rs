use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockall::mock;
use tutordesk_core::models::admin::SaveAdminRequest;
use tutordesk_core::models::student::SaveStudentRequest;
use tutordesk_core::models::teacher::SaveTeacherRequest;
use tutordesk_core::scheduling::PricedLesson;
use uuid::Uuid;

use crate::models::{
    DbAdmin, DbFinancialSummary, DbLesson, DbLessonListRow, DbSession, DbStudent, DbTeacher,
};

// Mock repositories for testing
mock! {
    pub LessonRepo {
        pub async fn create_lesson(
            &self,
            priced: PricedLesson,
            room: Option<&'static str>,
            notes: Option<&'static str>,
            payment_confirmed: bool,
        ) -> eyre::Result<DbLesson>;

        pub async fn get_lesson_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbLesson>>;

        pub async fn get_lessons_at_slot(
            &self,
            lesson_date: NaiveDate,
            lesson_time: NaiveTime,
        ) -> eyre::Result<Vec<DbLesson>>;

        pub async fn list_lessons(&self) -> eyre::Result<Vec<DbLessonListRow>>;

        pub async fn update_lesson(
            &self,
            id: Uuid,
            priced: PricedLesson,
            room: Option<&'static str>,
            notes: Option<&'static str>,
            payment_confirmed: bool,
        ) -> eyre::Result<Option<DbLesson>>;

        pub async fn delete_lesson(&self, id: Uuid) -> eyre::Result<bool>;
    }
}

mock! {
    pub TeacherRepo {
        pub async fn create_teacher(
            &self,
            req: SaveTeacherRequest,
        ) -> eyre::Result<DbTeacher>;

        pub async fn get_teacher_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTeacher>>;

        pub async fn list_teachers(
            &self,
            active_only: bool,
        ) -> eyre::Result<Vec<DbTeacher>>;

        pub async fn update_teacher(
            &self,
            id: Uuid,
            req: SaveTeacherRequest,
        ) -> eyre::Result<Option<DbTeacher>>;

        pub async fn set_teacher_active(
            &self,
            id: Uuid,
            active: bool,
        ) -> eyre::Result<Option<DbTeacher>>;
    }
}

mock! {
    pub StudentRepo {
        pub async fn create_student(
            &self,
            req: SaveStudentRequest,
        ) -> eyre::Result<DbStudent>;

        pub async fn get_student_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbStudent>>;

        pub async fn list_students(
            &self,
            active_only: bool,
        ) -> eyre::Result<Vec<DbStudent>>;

        pub async fn update_student(
            &self,
            id: Uuid,
            req: SaveStudentRequest,
        ) -> eyre::Result<Option<DbStudent>>;

        pub async fn set_student_active(
            &self,
            id: Uuid,
            active: bool,
        ) -> eyre::Result<Option<DbStudent>>;
    }
}

mock! {
    pub AdminRepo {
        pub async fn create_admin(
            &self,
            req: SaveAdminRequest,
            password_hash: Option<&'static str>,
            is_root: bool,
        ) -> eyre::Result<DbAdmin>;

        pub async fn get_admin_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAdmin>>;

        pub async fn get_admin_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbAdmin>>;

        pub async fn list_admins(&self) -> eyre::Result<Vec<DbAdmin>>;

        pub async fn update_admin(
            &self,
            id: Uuid,
            req: SaveAdminRequest,
            password_hash: Option<&'static str>,
        ) -> eyre::Result<Option<DbAdmin>>;

        pub async fn set_admin_active(
            &self,
            id: Uuid,
            active: bool,
        ) -> eyre::Result<Option<DbAdmin>>;

        pub async fn verify_password(
            &self,
            email: &'static str,
            password: &'static str,
        ) -> eyre::Result<Option<DbAdmin>>;
    }
}

mock! {
    pub SessionRepo {
        pub async fn create_session(
            &self,
            token: &'static str,
            admin_id: Uuid,
            expires_at: DateTime<Utc>,
        ) -> eyre::Result<DbSession>;

        pub async fn get_session(
            &self,
            token: &'static str,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn delete_session(&self, token: &'static str) -> eyre::Result<bool>;
    }
}

mock! {
    pub ReportRepo {
        pub async fn financial_summary(
            &self,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> eyre::Result<DbFinancialSummary>;
    }
}
