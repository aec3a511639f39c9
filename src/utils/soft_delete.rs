//! Soft-delete lifecycle shared by courses, instructors and students.
//!
//! Entities move Active -> Trashed (`soft_delete`), Trashed -> Active
//! (`restore`) and Trashed -> Purged (`force_delete`). Trashed rows are
//! excluded from default queries but stay addressable by id. A force delete
//! only matches rows that are already trashed, so purging an active row
//! answers 404 and leaves it in place.

use sqlx::PgPool;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Marks an entity as living in a soft-deletable table.
pub trait SoftDeletable {
    /// Table name, must contain a `deleted_at` column.
    const TABLE: &'static str;
    /// Display name used in not-found messages.
    const ENTITY: &'static str;
}

pub async fn soft_delete<T: SoftDeletable>(db: &PgPool, id: Uuid) -> Result<(), AppError> {
    let sql = format!(
        "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
         WHERE id = $1 AND deleted_at IS NULL",
        T::TABLE
    );

    let result = sqlx::query(&sql).bind(id).execute(db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow::anyhow!(
            "{} not found.",
            T::ENTITY
        )));
    }

    Ok(())
}

pub async fn restore<T>(db: &PgPool, id: Uuid) -> Result<T, AppError>
where
    T: SoftDeletable + for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let sql = format!(
        "UPDATE {} SET deleted_at = NULL, updated_at = NOW() \
         WHERE id = $1 AND deleted_at IS NOT NULL \
         RETURNING *",
        T::TABLE
    );

    sqlx::query_as::<_, T>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("{} not found.", T::ENTITY)))
}

pub async fn force_delete<T: SoftDeletable>(db: &PgPool, id: Uuid) -> Result<(), AppError> {
    let sql = format!(
        "DELETE FROM {} WHERE id = $1 AND deleted_at IS NOT NULL",
        T::TABLE
    );

    let result = sqlx::query(&sql).bind(id).execute(db).await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(anyhow::anyhow!(
            "{} not found.",
            T::ENTITY
        )));
    }

    Ok(())
}

/// Trashed rows, newest deletions first.
pub async fn list_trashed<T>(
    db: &PgPool,
    per_page: i64,
    offset: i64,
) -> Result<(Vec<T>, i64), AppError>
where
    T: SoftDeletable + for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let count_sql = format!(
        "SELECT COUNT(*) FROM {} WHERE deleted_at IS NOT NULL",
        T::TABLE
    );
    let total: i64 = sqlx::query_scalar(&count_sql).fetch_one(db).await?;

    let sql = format!(
        "SELECT * FROM {} WHERE deleted_at IS NOT NULL \
         ORDER BY deleted_at DESC LIMIT $1 OFFSET $2",
        T::TABLE
    );
    let rows = sqlx::query_as::<_, T>(&sql)
        .bind(per_page)
        .bind(offset)
        .fetch_all(db)
        .await?;

    Ok((rows, total))
}
