use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::Course;
use crate::modules::students::model::Student;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::utils::relations::{self, INSTRUCTOR_COURSES};
use crate::utils::soft_delete;

use super::model::{
    CreateInstructorDto, Instructor, InstructorWithCourses, InstructorWithStudents,
    UpdateInstructorDto,
};

const INSTRUCTOR_COLUMNS: &str =
    "id, name, experience, specialty, deleted_at, created_at, updated_at";

pub struct InstructorService;

impl InstructorService {
    #[instrument(skip(db, params))]
    pub async fn list(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Instructor>, i64), AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM instructors WHERE deleted_at IS NULL")
                .fetch_one(db)
                .await?;

        let instructors = sqlx::query_as::<_, Instructor>(&format!(
            "SELECT {INSTRUCTOR_COLUMNS} FROM instructors WHERE deleted_at IS NULL \
             ORDER BY name LIMIT $1 OFFSET $2"
        ))
        .bind(params.per_page())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        Ok((instructors, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateInstructorDto) -> Result<Instructor, AppError> {
        let instructor = sqlx::query_as::<_, Instructor>(&format!(
            "INSERT INTO instructors (name, experience, specialty) \
             VALUES ($1, $2, $3) \
             RETURNING {INSTRUCTOR_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.experience)
        .bind(&dto.specialty)
        .fetch_one(db)
        .await?;

        Ok(instructor)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Instructor, AppError> {
        sqlx::query_as::<_, Instructor>(&format!(
            "SELECT {INSTRUCTOR_COLUMNS} FROM instructors WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Instructor not found.")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateInstructorDto,
    ) -> Result<Instructor, AppError> {
        let existing = Self::get(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let experience = dto.experience.unwrap_or(existing.experience);
        let specialty = dto.specialty.unwrap_or(existing.specialty);

        let instructor = sqlx::query_as::<_, Instructor>(&format!(
            "UPDATE instructors \
             SET name = $1, experience = $2, specialty = $3, updated_at = NOW() \
             WHERE id = $4 AND deleted_at IS NULL \
             RETURNING {INSTRUCTOR_COLUMNS}"
        ))
        .bind(&name)
        .bind(experience)
        .bind(&specialty)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(instructor)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::soft_delete::<Instructor>(db, id).await
    }

    pub async fn restore(db: &PgPool, id: Uuid) -> Result<Instructor, AppError> {
        soft_delete::restore::<Instructor>(db, id).await
    }

    pub async fn trashed(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Instructor>, i64), AppError> {
        soft_delete::list_trashed::<Instructor>(db, params.per_page(), params.offset()).await
    }

    pub async fn force_delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::force_delete::<Instructor>(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn with_courses(db: &PgPool, id: Uuid) -> Result<InstructorWithCourses, AppError> {
        let instructor = Self::get(db, id).await?;

        let courses = sqlx::query_as::<_, Course>(
            "SELECT c.id, c.title, c.description, c.start_date, c.deleted_at, \
                    c.created_at, c.updated_at \
             FROM courses c \
             JOIN course_instructor ci ON ci.course_id = c.id \
             WHERE ci.instructor_id = $1 AND c.deleted_at IS NULL \
             ORDER BY c.start_date, c.title",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(InstructorWithCourses {
            instructor,
            courses,
        })
    }

    /// Students are not directly related to instructors. The chain is
    /// instructor -> course_instructor -> course -> course_student -> student,
    /// so both edge tables meet on the shared course id.
    #[instrument(skip(db))]
    pub async fn with_students(
        db: &PgPool,
        id: Uuid,
    ) -> Result<InstructorWithStudents, AppError> {
        let instructor = Self::get(db, id).await?;

        let students = sqlx::query_as::<_, Student>(
            "SELECT DISTINCT s.id, s.name, s.email, s.deleted_at, s.created_at, s.updated_at \
             FROM students s \
             JOIN course_student cs ON cs.student_id = s.id \
             JOIN course_instructor ci ON ci.course_id = cs.course_id \
             WHERE ci.instructor_id = $1 AND s.deleted_at IS NULL \
             ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(InstructorWithStudents {
            instructor,
            students,
        })
    }

    #[instrument(skip(db, course_ids))]
    pub async fn assign_courses(
        db: &PgPool,
        id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<InstructorWithCourses, AppError> {
        Self::get(db, id).await?;
        relations::assign(db, &INSTRUCTOR_COURSES, id, course_ids).await?;
        Self::with_courses(db, id).await
    }

    #[instrument(skip(db, course_ids))]
    pub async fn unassign_courses(
        db: &PgPool,
        id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<InstructorWithCourses, AppError> {
        Self::get(db, id).await?;
        relations::unassign(db, &INSTRUCTOR_COURSES, id, course_ids).await?;
        Self::with_courses(db, id).await
    }
}
