use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::Course;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::utils::password::hash_password;
use crate::utils::relations::{self, STUDENT_COURSES};
use crate::utils::soft_delete;

use super::model::{CreateStudentDto, Student, StudentWithCourses, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, name, email, deleted_at, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, params))]
    pub async fn list(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE deleted_at IS NULL")
                .fetch_one(db)
                .await?;

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE deleted_at IS NULL \
             ORDER BY name LIMIT $1 OFFSET $2"
        ))
        .bind(params.per_page())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        Ok((students, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        Self::ensure_email_available(db, &dto.email, None).await?;

        let password = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (name, email, password) \
             VALUES ($1, $2, $3) \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found.")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateStudentDto) -> Result<Student, AppError> {
        let existing = Self::get(db, id).await?;

        if let Some(email) = &dto.email {
            if email != &existing.email {
                Self::ensure_email_available(db, email, Some(id)).await?;
            }
        }

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let password = dto.password.map(|p| hash_password(&p)).transpose()?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students \
             SET name = $1, email = $2, password = COALESCE($3, password), updated_at = NOW() \
             WHERE id = $4 AND deleted_at IS NULL \
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&name)
        .bind(&email)
        .bind(&password)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::soft_delete::<Student>(db, id).await
    }

    pub async fn restore(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        soft_delete::restore::<Student>(db, id).await
    }

    pub async fn trashed(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        soft_delete::list_trashed::<Student>(db, params.per_page(), params.offset()).await
    }

    pub async fn force_delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::force_delete::<Student>(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn with_courses(db: &PgPool, id: Uuid) -> Result<StudentWithCourses, AppError> {
        let student = Self::get(db, id).await?;

        let courses = sqlx::query_as::<_, Course>(
            "SELECT c.id, c.title, c.description, c.start_date, c.deleted_at, \
                    c.created_at, c.updated_at \
             FROM courses c \
             JOIN course_student cs ON cs.course_id = c.id \
             WHERE cs.student_id = $1 AND c.deleted_at IS NULL \
             ORDER BY c.start_date, c.title",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(StudentWithCourses { student, courses })
    }

    #[instrument(skip(db, course_ids))]
    pub async fn assign_courses(
        db: &PgPool,
        id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<StudentWithCourses, AppError> {
        Self::get(db, id).await?;
        relations::assign(db, &STUDENT_COURSES, id, course_ids).await?;
        Self::with_courses(db, id).await
    }

    #[instrument(skip(db, course_ids))]
    pub async fn unassign_courses(
        db: &PgPool,
        id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<StudentWithCourses, AppError> {
        Self::get(db, id).await?;
        relations::unassign(db, &STUDENT_COURSES, id, course_ids).await?;
        Self::with_courses(db, id).await
    }

    /// Emails identify login accounts across both realms, so a student email
    /// must not collide with any admin user's email either.
    async fn ensure_email_available(
        db: &PgPool,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), AppError> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1) \
                 OR EXISTS (SELECT 1 FROM students WHERE email = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(db)
        .await?;

        if taken {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "The email address has already been taken, please choose another email ."
            )));
        }

        Ok(())
    }
}
