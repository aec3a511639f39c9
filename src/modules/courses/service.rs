use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::instructors::model::Instructor;
use crate::modules::students::model::Student;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use crate::utils::relations::{self, COURSE_INSTRUCTORS};
use crate::utils::soft_delete;

use super::model::{
    Course, CourseWithInstructors, CourseWithStudents, CreateCourseDto, UpdateCourseDto,
};

const COURSE_COLUMNS: &str = "id, title, description, start_date, deleted_at, created_at, updated_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, params))]
    pub async fn list(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE deleted_at IS NULL")
                .fetch_one(db)
                .await?;

        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE deleted_at IS NULL \
             ORDER BY start_date, title LIMIT $1 OFFSET $2"
        ))
        .bind(params.per_page())
        .bind(params.offset())
        .fetch_all(db)
        .await?;

        Ok((courses, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, start_date) \
             VALUES ($1, $2, $3) \
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.start_date)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found.")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.unwrap_or(existing.description);
        let start_date = dto.start_date.unwrap_or(existing.start_date);

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses \
             SET title = $1, description = $2, start_date = $3, updated_at = NOW() \
             WHERE id = $4 AND deleted_at IS NULL \
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&title)
        .bind(&description)
        .bind(start_date)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::soft_delete::<Course>(db, id).await
    }

    pub async fn restore(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        soft_delete::restore::<Course>(db, id).await
    }

    pub async fn trashed(
        db: &PgPool,
        params: &PaginationParams,
    ) -> Result<(Vec<Course>, i64), AppError> {
        soft_delete::list_trashed::<Course>(db, params.per_page(), params.offset()).await
    }

    pub async fn force_delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        soft_delete::force_delete::<Course>(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn with_instructors(
        db: &PgPool,
        id: Uuid,
    ) -> Result<CourseWithInstructors, AppError> {
        let course = Self::get(db, id).await?;

        let instructors = sqlx::query_as::<_, Instructor>(
            "SELECT i.id, i.name, i.experience, i.specialty, i.deleted_at, \
                    i.created_at, i.updated_at \
             FROM instructors i \
             JOIN course_instructor ci ON ci.instructor_id = i.id \
             WHERE ci.course_id = $1 AND i.deleted_at IS NULL \
             ORDER BY i.name",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(CourseWithInstructors {
            course,
            instructors,
        })
    }

    #[instrument(skip(db))]
    pub async fn with_students(db: &PgPool, id: Uuid) -> Result<CourseWithStudents, AppError> {
        let course = Self::get(db, id).await?;

        let students = sqlx::query_as::<_, Student>(
            "SELECT s.id, s.name, s.email, s.deleted_at, s.created_at, s.updated_at \
             FROM students s \
             JOIN course_student cs ON cs.student_id = s.id \
             WHERE cs.course_id = $1 AND s.deleted_at IS NULL \
             ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(CourseWithStudents { course, students })
    }

    #[instrument(skip(db, instructor_ids))]
    pub async fn assign_instructors(
        db: &PgPool,
        id: Uuid,
        instructor_ids: &[Uuid],
    ) -> Result<CourseWithInstructors, AppError> {
        Self::get(db, id).await?;
        relations::assign(db, &COURSE_INSTRUCTORS, id, instructor_ids).await?;
        Self::with_instructors(db, id).await
    }

    #[instrument(skip(db, instructor_ids))]
    pub async fn unassign_instructors(
        db: &PgPool,
        id: Uuid,
        instructor_ids: &[Uuid],
    ) -> Result<CourseWithInstructors, AppError> {
        Self::get(db, id).await?;
        relations::unassign(db, &COURSE_INSTRUCTORS, id, instructor_ids).await?;
        Self::with_instructors(db, id).await
    }
}
