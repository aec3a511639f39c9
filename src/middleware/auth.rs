use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::modules::auth::model::{Claims, Realm};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Pulls the bearer token out of the Authorization header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized(anyhow::anyhow!("Missing authorization header")))?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized(anyhow::anyhow!("Invalid authorization header format"))
    })
}

/// Extractor that validates the JWT, checks the revocation list, and exposes
/// the realm and subject the token was issued for. Every protected handler
/// receives one of these; no ambient auth state is consulted afterwards.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub realm: Realm,
    pub subject_id: Uuid,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.jwt_config)?;

        // Revocation is read before use: a token logged out on another
        // request must already be rejected here.
        if AuthService::is_revoked(&state.db, claims.jti).await? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid or expired token"
            )));
        }

        let subject_id = claims.subject_id()?;

        Ok(AuthContext {
            realm: claims.realm,
            subject_id,
            claims,
        })
    }
}
