use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{current, login, logout, refresh};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/current", get(current))
}
