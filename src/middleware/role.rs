//! Admin gate for mutating operations.
//!
//! Listing and single-item reads only need a valid token from either realm;
//! everything that writes goes through [`RequireAdmin`].

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::AuthContext;
use crate::modules::auth::model::Realm;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that passes only for admin-realm tokens whose account carries
/// `is_admin`. A student token never satisfies this, whatever its subject.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_request_parts(parts, state).await?;

        if ctx.realm != Realm::Admin {
            return Err(AppError::unauthorized(anyhow::anyhow!("Unauthorized")));
        }

        let is_admin: Option<bool> =
            sqlx::query_scalar("SELECT is_admin FROM users WHERE id = $1")
                .bind(ctx.subject_id)
                .fetch_optional(&state.db)
                .await?;

        if !is_admin.unwrap_or(false) {
            return Err(AppError::unauthorized(anyhow::anyhow!("Unauthorized")));
        }

        Ok(RequireAdmin(ctx))
    }
}
