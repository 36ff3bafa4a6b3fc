use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create teachers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            tax_id VARCHAR(32) NOT NULL,
            birth_date DATE NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NOT NULL,
            address TEXT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create students table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            birth_date DATE NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NOT NULL,
            guardian_name VARCHAR(255) NOT NULL,
            guardian_phone VARCHAR(32) NOT NULL,
            address TEXT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create admins table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            first_name VARCHAR(255) NOT NULL,
            last_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            phone VARCHAR(32) NOT NULL,
            password_hash VARCHAR(255) NULL,
            is_root BOOLEAN NOT NULL DEFAULT FALSE,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create sessions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token VARCHAR(64) PRIMARY KEY,
            admin_id UUID NOT NULL REFERENCES admins(id),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create lessons table. The unique teacher/slot constraint backstops the
    // validator against concurrent writes for the same teacher; student
    // collisions span two nullable columns and stay validator-enforced.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            teacher_id UUID NOT NULL REFERENCES teachers(id),
            student1_id UUID NOT NULL REFERENCES students(id),
            student2_id UUID NULL REFERENCES students(id),
            lesson_date DATE NOT NULL,
            lesson_time TIME NOT NULL,
            room VARCHAR(64) NULL,
            price DOUBLE PRECISION NOT NULL,
            teacher_pay DOUBLE PRECISION NOT NULL,
            payment_confirmed BOOLEAN NOT NULL DEFAULT FALSE,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT distinct_students CHECK (student2_id IS NULL OR student2_id <> student1_id),
            CONSTRAINT teacher_slot_unique UNIQUE (teacher_id, lesson_date, lesson_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_lessons_slot ON lessons(lesson_date, lesson_time)",
        "CREATE INDEX IF NOT EXISTS idx_lessons_date ON lessons(lesson_date)",
        "CREATE INDEX IF NOT EXISTS idx_lessons_teacher_id ON lessons(teacher_id)",
        "CREATE INDEX IF NOT EXISTS idx_lessons_student1_id ON lessons(student1_id)",
        "CREATE INDEX IF NOT EXISTS idx_lessons_student2_id ON lessons(student2_id)",
        "CREATE INDEX IF NOT EXISTS idx_sessions_admin_id ON sessions(admin_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
