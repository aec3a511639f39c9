use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::students::model::Student;
use crate::utils::errors::AppError;
use crate::utils::jwt::{create_access_token, decode_token};
use crate::utils::password::verify_password;

use super::model::{Claims, Identity, LoginRequest, LoginResponse, Realm, User};

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    password: String,
}

pub struct AuthService;

impl AuthService {
    /// Resolves the realm by probing the students table first: an email that
    /// matches a student row authenticates against the student credential
    /// store, everything else falls back to the admin store. The client never
    /// declares which kind of account it holds.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let student = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, password FROM students WHERE email = $1 AND deleted_at IS NULL",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let (credentials, realm) = match student {
            Some(row) => (row, Realm::Student),
            None => {
                let user = sqlx::query_as::<_, CredentialRow>(
                    "SELECT id, password FROM users WHERE email = $1",
                )
                .bind(&dto.email)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Invalid credentials")))?;
                (user, Realm::Admin)
            }
        };

        if !verify_password(&dto.password, &credentials.password)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid credentials"
            )));
        }

        let user = Self::resolve_identity(db, realm, credentials.id).await?;
        Self::token_response(user, jwt_config)
    }

    /// Invalidates the presented token and issues a new one for the same
    /// subject and realm. Expiry answers 401; every other verification
    /// failure, including an already-revoked jti, is the generic refresh
    /// failure.
    #[instrument(skip(db, token, jwt_config))]
    pub async fn refresh(
        db: &PgPool,
        token: &str,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let claims = decode_token(token, jwt_config).map_err(|e| {
            if matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            ) {
                AppError::unauthorized(anyhow::anyhow!("Token has expired"))
            } else {
                AppError::internal(anyhow::anyhow!("Could not refresh the token"))
            }
        })?;

        if Self::is_revoked(db, claims.jti).await? {
            return Err(AppError::internal(anyhow::anyhow!(
                "Could not refresh the token"
            )));
        }

        let subject_id = claims.subject_id()?;
        let user = Self::resolve_identity(db, claims.realm, subject_id).await?;

        Self::revoke(db, &claims).await?;
        Self::token_response(user, jwt_config)
    }

    #[instrument(skip(db, claims))]
    pub async fn logout(db: &PgPool, claims: &Claims) -> Result<(), AppError> {
        Self::revoke(db, claims)
            .await
            .map_err(|_| AppError::internal(anyhow::anyhow!("Could not log out the user")))
    }

    pub async fn current(
        db: &PgPool,
        realm: Realm,
        subject_id: Uuid,
    ) -> Result<Identity, AppError> {
        Self::resolve_identity(db, realm, subject_id).await
    }

    /// Checked synchronously on every authenticated request: a token whose
    /// revocation record exists must be rejected.
    pub async fn is_revoked(db: &PgPool, jti: Uuid) -> Result<bool, AppError> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(db)
                .await?;

        Ok(revoked)
    }

    async fn revoke(db: &PgPool, claims: &Claims) -> Result<(), AppError> {
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0)
            .unwrap_or_else(Utc::now);

        sqlx::query(
            "INSERT INTO revoked_tokens (jti, expires_at) VALUES ($1, $2) \
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(claims.jti)
        .bind(expires_at)
        .execute(db)
        .await?;

        Ok(())
    }

    /// Dispatches on the realm tag to pick the credential table.
    pub async fn resolve_identity(
        db: &PgPool,
        realm: Realm,
        subject_id: Uuid,
    ) -> Result<Identity, AppError> {
        match realm {
            Realm::Admin => {
                let user = sqlx::query_as::<_, User>(
                    "SELECT id, name, email, is_admin, created_at, updated_at \
                     FROM users WHERE id = $1",
                )
                .bind(subject_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized(anyhow::anyhow!("Invalid or expired token"))
                })?;
                Ok(Identity::Admin(user))
            }
            Realm::Student => {
                let student = sqlx::query_as::<_, Student>(
                    "SELECT id, name, email, deleted_at, created_at, updated_at \
                     FROM students WHERE id = $1 AND deleted_at IS NULL",
                )
                .bind(subject_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized(anyhow::anyhow!("Invalid or expired token"))
                })?;
                Ok(Identity::Student(student))
            }
        }
    }

    fn token_response(
        user: Identity,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let access_token = create_access_token(user.id(), user.realm(), jwt_config)?;

        Ok(LoginResponse {
            user,
            access_token,
            expires_in: jwt_config.access_token_expiry,
            token_type: "bearer".to_string(),
        })
    }
}
