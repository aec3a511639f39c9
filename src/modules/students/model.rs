use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::courses::model::Course;
use crate::utils::relations::IdRef;
use crate::utils::soft_delete::SoftDeletable;

/// A student record. The password hash lives in the table but is never
/// selected into this struct, so it cannot leak into a response body.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl SoftDeletable for Student {
    const TABLE: &'static str = "students";
    const ENTITY: &'static str = "Student";
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 20, message = "The Student Name field is required."))]
    pub name: String,
    #[validate(
        email(message = "The Email field must be a valid email address."),
        length(max = 100, message = "The Email field must not exceed 100 characters.")
    )]
    pub email: String,
    #[validate(length(min = 8, message = "The Password field must be at least 8 characters."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 20, message = "The Student Name field must not be empty."))]
    pub name: Option<String>,
    #[validate(
        email(message = "The Email field must be a valid email address."),
        length(max = 100, message = "The Email field must not exceed 100 characters.")
    )]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "The Password field must be at least 8 characters."))]
    pub password: Option<String>,
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
pub struct StudentWithCourses {
    #[serde(flatten)]
    pub student: Student,
    pub courses: Vec<Course>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_deletable_table() {
        assert_eq!(Student::TABLE, "students");
        assert_eq!(Student::ENTITY, "Student");
    }

    #[test]
    fn test_password_rejected_when_too_short() {
        let dto = CreateStudentDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateStudentDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_name_capped_at_twenty_characters() {
        let dto = CreateStudentDto {
            name: "a".repeat(21),
            email: "ada@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_password_never_serialized() {
        let student = Student {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            deleted_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&student).unwrap();
        assert!(!json.contains("password"));
    }
}
