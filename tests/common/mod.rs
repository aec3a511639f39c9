use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use lectern::config::jwt::JwtConfig;
use lectern::router::init_router;
use lectern::state::AppState;
use lectern::utils::password::hash_password;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts an admin-realm account, admin flag included unless `is_admin` is
/// false.
#[allow(dead_code)]
pub async fn create_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    is_admin: bool,
) -> Uuid {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar(
        "INSERT INTO users (name, email, password, is_admin) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(hashed)
    .bind(is_admin)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_admin_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
) -> Uuid {
    create_user(tx, email, password, true).await
}

#[allow(dead_code)]
pub async fn create_student(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
) -> Uuid {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar(
        "INSERT INTO students (name, email, password) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind("Test Student")
    .bind(email)
    .bind(hashed)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_instructor(tx: &mut Transaction<'_, Postgres>, name: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO instructors (name, experience, specialty) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(name)
    .bind(5)
    .bind("Test Specialty")
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_course(tx: &mut Transaction<'_, Postgres>, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO courses (title, description, start_date) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(title)
    .bind("Test course description")
    .bind(chrono::Utc::now() + chrono::Duration::days(7))
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/v1/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}
