//! PostgreSQL connection pool setup.
//!
//! The database URL is read from the `DATABASE_URL` environment variable.

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool used throughout the application.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails; the server
/// cannot do anything useful without a database.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
