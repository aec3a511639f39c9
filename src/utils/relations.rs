//! Many-to-many edge management between courses, instructors and students.
//!
//! Assign and unassign both run in a single transaction: a bad target id
//! rolls back edges already written for earlier ids in the same call.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Body element of the assign/unassign requests: `{"id": "..."}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct IdRef {
    pub id: Uuid,
}

/// Describes one direction of a join table.
#[derive(Debug, Clone, Copy)]
pub struct EdgeTable {
    pub table: &'static str,
    pub owner_col: &'static str,
    pub target_col: &'static str,
    /// Table the target ids must resolve against.
    pub target_table: &'static str,
    /// Display name for validation messages.
    pub target_entity: &'static str,
}

pub const COURSE_INSTRUCTORS: EdgeTable = EdgeTable {
    table: "course_instructor",
    owner_col: "course_id",
    target_col: "instructor_id",
    target_table: "instructors",
    target_entity: "Instructor",
};

pub const COURSE_STUDENTS: EdgeTable = EdgeTable {
    table: "course_student",
    owner_col: "course_id",
    target_col: "student_id",
    target_table: "students",
    target_entity: "Student",
};

pub const INSTRUCTOR_COURSES: EdgeTable = EdgeTable {
    table: "course_instructor",
    owner_col: "instructor_id",
    target_col: "course_id",
    target_table: "courses",
    target_entity: "Course",
};

pub const STUDENT_COURSES: EdgeTable = EdgeTable {
    table: "course_student",
    owner_col: "student_id",
    target_col: "course_id",
    target_table: "courses",
    target_entity: "Course",
};

/// Creates the missing edges for `target_ids`. Existing edges are left alone,
/// so repeating an assignment is a no-op rather than an error. Every target id
/// must resolve to a live (non-trashed) row; otherwise the whole call fails
/// with a validation error and nothing is written.
pub async fn assign(
    db: &PgPool,
    edge: &EdgeTable,
    owner_id: Uuid,
    target_ids: &[Uuid],
) -> Result<(), AppError> {
    let exists_sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted_at IS NULL)",
        edge.target_table
    );
    let insert_sql = format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        edge.table, edge.owner_col, edge.target_col
    );

    let mut tx = db.begin().await?;

    for &target_id in target_ids {
        let exists: bool = sqlx::query_scalar(&exists_sql)
            .bind(target_id)
            .fetch_one(&mut *tx)
            .await?;

        if !exists {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "{} with id {} does not exist.",
                edge.target_entity,
                target_id
            )));
        }

        sqlx::query(&insert_sql)
            .bind(owner_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Removes the edges for `target_ids`. Absent edges are a silent no-op.
pub async fn unassign(
    db: &PgPool,
    edge: &EdgeTable,
    owner_id: Uuid,
    target_ids: &[Uuid],
) -> Result<(), AppError> {
    let delete_sql = format!(
        "DELETE FROM {} WHERE {} = $1 AND {} = $2",
        edge.table, edge.owner_col, edge.target_col
    );

    let mut tx = db.begin().await?;

    for &target_id in target_ids {
        sqlx::query(&delete_sql)
            .bind(owner_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_tables_are_mirrored() {
        assert_eq!(COURSE_INSTRUCTORS.table, INSTRUCTOR_COURSES.table);
        assert_eq!(
            COURSE_INSTRUCTORS.owner_col,
            INSTRUCTOR_COURSES.target_col
        );
        assert_eq!(
            COURSE_INSTRUCTORS.target_col,
            INSTRUCTOR_COURSES.owner_col
        );

        assert_eq!(COURSE_STUDENTS.table, STUDENT_COURSES.table);
        assert_eq!(COURSE_STUDENTS.owner_col, STUDENT_COURSES.target_col);
        assert_eq!(COURSE_STUDENTS.target_col, STUDENT_COURSES.owner_col);
    }
}
