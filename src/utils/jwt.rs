use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, Realm};
use crate::utils::errors::AppError;

/// Issues a token scoped to one realm. The jti is fresh per token so that
/// logout/refresh can revoke it individually.
pub fn create_access_token(
    subject_id: Uuid,
    realm: Realm,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: subject_id.to_string(),
        realm,
        jti: Uuid::new_v4(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Decodes and verifies a token, keeping the raw jsonwebtoken error so callers
/// can distinguish expiry from other failures (the refresh flow needs this).
pub fn decode_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode_token(token, jwt_config)
        .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid or expired token")))
}
