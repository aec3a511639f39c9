use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::modules::students::model::Student;
use crate::utils::errors::AppError;

/// Authentication realm a token was issued under. Admin accounts live in
/// `users`, student self-accounts in `students`; the two credential stores
/// never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Realm {
    Admin,
    Student,
}

impl Realm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Realm::Admin => "admin",
            Realm::Student => "student",
        }
    }
}

impl std::fmt::Display for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// JWT claims. The realm tag decides which table the subject id resolves
// against; the jti is what revocation records point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub realm: Realm,
    pub jti: Uuid,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn subject_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid subject in token")))
    }
}

/// An admin-realm account. The password column is never selected into this
/// struct.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The authenticated subject, resolved from whichever realm issued the token.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Identity {
    Admin(User),
    Student(Student),
}

impl Identity {
    pub fn id(&self) -> Uuid {
        match self {
            Identity::Admin(user) => user.id,
            Identity::Student(student) => student.id,
        }
    }

    pub fn realm(&self) -> Realm {
        match self {
            Identity::Admin(_) => Realm::Admin,
            Identity::Student(_) => Realm::Student,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email Address must be a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

/// Token response, shared by login and refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: Identity,
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}
