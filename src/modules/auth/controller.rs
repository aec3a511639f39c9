use axum::Json;
use axum::extract::State;
use axum::http::request::Parts;
use tracing::instrument;

use crate::middleware::auth::{AuthContext, bearer_token};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::ApiResponse;
use crate::validator::ValidatedJson;

use super::model::{Identity, LoginRequest, LoginResponse};
use super::service::AuthService;

/// Log in under whichever realm matches the email
#[utoipa::path(
    post,
    path = "/auth/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Exchange the current token for a fresh one
#[utoipa::path(
    post,
    path = "/auth/v1/refresh",
    responses(
        (status = 200, description = "Token refreshed", body = LoginResponse),
        (status = 401, description = "Token has expired"),
        (status = 500, description = "Could not refresh the token")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, parts))]
pub async fn refresh(
    State(state): State<AppState>,
    parts: Parts,
) -> Result<Json<LoginResponse>, AppError> {
    // The refresh flow does its own verification so expiry and other
    // failures map to their specific statuses; the gate extractor would
    // collapse them all into one 401.
    let token = bearer_token(&parts)?;
    let response = AuthService::refresh(&state.db, token, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Revoke the current token
#[utoipa::path(
    post,
    path = "/auth/v1/logout",
    responses(
        (status = 200, description = "User has been logged out"),
        (status = 401, description = "Unauthenticated"),
        (status = 500, description = "Could not log out the user")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, ctx))]
pub async fn logout(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<()>>, AppError> {
    AuthService::logout(&state.db, &ctx.claims).await?;
    Ok(Json(ApiResponse::message("User has been logged out")))
}

/// Identity behind the attached token
#[utoipa::path(
    get,
    path = "/auth/v1/current",
    responses(
        (status = 200, description = "Current authenticated account", body = Identity),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, ctx))]
pub async fn current(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Identity>>, AppError> {
    let identity = AuthService::current(&state.db, ctx.realm, ctx.subject_id).await?;
    Ok(Json(ApiResponse::success(identity, "Operation Done")))
}
