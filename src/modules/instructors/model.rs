use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::students::model::Student;
use crate::utils::relations::IdRef;
use crate::utils::soft_delete::SoftDeletable;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Instructor {
    pub id: Uuid,
    pub name: String,
    pub experience: i32,
    pub specialty: String,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Instructor {
    const TABLE: &'static str = "instructors";
    const ENTITY: &'static str = "Instructor";
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInstructorDto {
    #[validate(length(min = 1, max = 100, message = "The Instructor Name field is required."))]
    pub name: String,
    #[validate(range(min = 1, message = "The Experience field must be a positive number."))]
    pub experience: i32,
    #[validate(length(min = 1, max = 100, message = "The Specialty field is required."))]
    pub specialty: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInstructorDto {
    #[validate(length(min = 1, max = 100, message = "The Instructor Name field must not be empty."))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "The Experience field must be a positive number."))]
    pub experience: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "The Specialty field must not be empty."))]
    pub specialty: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignCoursesDto {
    #[validate(length(min = 1, message = "The courses field is required."))]
    pub courses: Vec<IdRef>,
}

impl AssignCoursesDto {
    pub fn ids(&self) -> Vec<Uuid> {
        self.courses.iter().map(|r| r.id).collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorWithCourses {
    #[serde(flatten)]
    pub instructor: Instructor,
    pub courses: Vec<crate::modules::courses::model::Course>,
}

/// An instructor's students are derived: every student sharing at least one
/// course with the instructor.
#[derive(Debug, Serialize, ToSchema)]
pub struct InstructorWithStudents {
    #[serde(flatten)]
    pub instructor: Instructor,
    pub students: Vec<Student>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_deletable_table() {
        assert_eq!(Instructor::TABLE, "instructors");
        assert_eq!(Instructor::ENTITY, "Instructor");
    }

    #[test]
    fn test_experience_must_be_positive() {
        use validator::Validate;

        let dto = CreateInstructorDto {
            name: "Grace".to_string(),
            experience: 0,
            specialty: "Compilers".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateInstructorDto {
            name: "Grace".to_string(),
            experience: 12,
            specialty: "Compilers".to_string(),
        };
        assert!(dto.validate().is_ok());
    }
}
