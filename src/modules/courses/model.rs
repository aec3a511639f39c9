use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::modules::instructors::model::Instructor;
use crate::modules::students::model::Student;
use crate::utils::relations::IdRef;
use crate::utils::soft_delete::SoftDeletable;
use uuid::Uuid;
use validator::Validate;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Course {
    const TABLE: &'static str = "courses";
    const ENTITY: &'static str = "Course";
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255, message = "The Title field is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "The Description field is required."))]
    pub description: String,
    pub start_date: chrono::DateTime<chrono::Utc>,
}

/// Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 255, message = "The Title field must not be empty."))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "The Description field must not be empty."))]
    pub description: Option<String>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignInstructorsDto {
    #[validate(length(min = 1, message = "The instructors field is required."))]
    pub instructors: Vec<IdRef>,
}

impl AssignInstructorsDto {
    pub fn ids(&self) -> Vec<Uuid> {
        self.instructors.iter().map(|r| r.id).collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseWithInstructors {
    #[serde(flatten)]
    pub course: Course,
    pub instructors: Vec<Instructor>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseWithStudents {
    #[serde(flatten)]
    pub course: Course,
    pub students: Vec<Student>,
}
