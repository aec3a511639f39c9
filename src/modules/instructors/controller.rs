use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthContext;
use crate::middleware::role::RequireAdmin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Pagination, PaginationParams};
use crate::utils::response::{ApiResponse, PaginatedResponse};
use crate::validator::ValidatedJson;

use super::model::{
    AssignCoursesDto, CreateInstructorDto, Instructor, InstructorWithCourses,
    InstructorWithStudents, UpdateInstructorDto,
};
use super::service::InstructorService;

/// List instructors
#[utoipa::path(
    get,
    path = "/v1/instructors",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of active instructors"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _ctx))]
pub async fn list_instructors(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Instructor>>, AppError> {
    let (instructors, total) = InstructorService::list(&state.db, &params).await?;
    let pagination = Pagination::new(total, instructors.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        instructors,
        pagination,
        "Operation Success",
    )))
}

/// Create an instructor
#[utoipa::path(
    post,
    path = "/v1/instructors",
    request_body = CreateInstructorDto,
    responses(
        (status = 200, description = "Instructor created"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateInstructorDto>,
) -> Result<Json<ApiResponse<Instructor>>, AppError> {
    let instructor = InstructorService::create(&state.db, dto).await?;
    Ok(Json(ApiResponse::success(
        instructor,
        "Instructor Created Successfully",
    )))
}

/// Show an instructor
#[utoipa::path(
    get,
    path = "/v1/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor details"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _ctx))]
pub async fn get_instructor(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Instructor>>, AppError> {
    let instructor = InstructorService::get(&state.db, id).await?;
    Ok(Json(ApiResponse::success(instructor, "Operation Done")))
}

/// Update an instructor
#[utoipa::path(
    put,
    path = "/v1/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = UpdateInstructorDto,
    responses(
        (status = 200, description = "Instructor updated"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateInstructorDto>,
) -> Result<Json<ApiResponse<Instructor>>, AppError> {
    let instructor = InstructorService::update(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::success(
        instructor,
        "Instructor Updated Successfully",
    )))
}

/// Soft-delete an instructor
#[utoipa::path(
    delete,
    path = "/v1/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor trashed"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    InstructorService::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Instructor Deleted Successfully")))
}

/// Restore a trashed instructor
#[utoipa::path(
    post,
    path = "/v1/instructors/restore/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor restored"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin))]
pub async fn restore_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Instructor>>, AppError> {
    let instructor = InstructorService::restore(&state.db, id).await?;
    Ok(Json(ApiResponse::success(
        instructor,
        "Instructor Restored Successfully",
    )))
}

/// List trashed instructors
#[utoipa::path(
    get,
    path = "/v1/trashed/instructors",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of trashed instructors"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _ctx))]
pub async fn trashed_instructors(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Instructor>>, AppError> {
    let (instructors, total) = InstructorService::trashed(&state.db, &params).await?;
    let pagination = Pagination::new(total, instructors.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        instructors,
        pagination,
        "Trashed Instructors",
    )))
}

/// Permanently delete a trashed instructor
#[utoipa::path(
    delete,
    path = "/v1/instructors/force-delete/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor purged"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin))]
pub async fn force_delete_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    InstructorService::force_delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Instructor Deleted Successfully")))
}

/// Show an instructor with their courses
#[utoipa::path(
    get,
    path = "/v1/instructors/{id}/courses",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor with courses loaded"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _ctx))]
pub async fn instructor_courses(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InstructorWithCourses>>, AppError> {
    let instructor = InstructorService::with_courses(&state.db, id).await?;
    Ok(Json(ApiResponse::success(instructor, "Operation Done")))
}

/// Show an instructor with their derived students
#[utoipa::path(
    get,
    path = "/v1/instructors/{id}/students",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    responses(
        (status = 200, description = "Instructor with students sharing a course"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _ctx))]
pub async fn instructor_students(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InstructorWithStudents>>, AppError> {
    let instructor = InstructorService::with_students(&state.db, id).await?;
    Ok(Json(ApiResponse::success(instructor, "Operation Done")))
}

/// Assign courses to an instructor
#[utoipa::path(
    post,
    path = "/v1/assign-instructor-course/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = AssignCoursesDto,
    responses(
        (status = 200, description = "Instructor with courses after the assignment"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found"),
        (status = 422, description = "Unknown course id")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn assign_instructor_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCoursesDto>,
) -> Result<Json<ApiResponse<InstructorWithCourses>>, AppError> {
    let instructor = InstructorService::assign_courses(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        instructor,
        "Instructor Assigned To Course Successfully",
    )))
}

/// Unassign courses from an instructor
#[utoipa::path(
    post,
    path = "/v1/unassign-instructor-course/{id}",
    params(("id" = Uuid, Path, description = "Instructor ID")),
    request_body = AssignCoursesDto,
    responses(
        (status = 200, description = "Instructor with courses after the removal"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Instructor not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Instructors"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn unassign_instructor_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCoursesDto>,
) -> Result<Json<ApiResponse<InstructorWithCourses>>, AppError> {
    let instructor = InstructorService::unassign_courses(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        instructor,
        "Instructor Unassigned From Course Successfully",
    )))
}
