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
    AssignInstructorsDto, Course, CourseWithInstructors, CourseWithStudents, CreateCourseDto,
    UpdateCourseDto,
};
use super::service::CourseService;

/// List courses
#[utoipa::path(
    get,
    path = "/v1/courses",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of active courses"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn list_courses(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Course>>, AppError> {
    let (courses, total) = CourseService::list(&state.db, &params).await?;
    let pagination = Pagination::new(total, courses.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        courses,
        pagination,
        "Operation Success",
    )))
}

/// Create a course
#[utoipa::path(
    post,
    path = "/v1/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::create(&state.db, dto).await?;
    Ok(Json(ApiResponse::success(
        course,
        "Course Created Successfully",
    )))
}

/// Show a course
#[utoipa::path(
    get,
    path = "/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn get_course(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::get(&state.db, id).await?;
    Ok(Json(ApiResponse::success(course, "Operation Done")))
}

/// Update a course
#[utoipa::path(
    put,
    path = "/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::update(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::success(
        course,
        "Course Updated Successfully",
    )))
}

/// Soft-delete a course
#[utoipa::path(
    delete,
    path = "/v1/courses/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course trashed"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CourseService::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Course Deleted Successfully")))
}

/// Restore a trashed course
#[utoipa::path(
    post,
    path = "/v1/courses/restore/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course restored"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn restore_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Course>>, AppError> {
    let course = CourseService::restore(&state.db, id).await?;
    Ok(Json(ApiResponse::success(
        course,
        "Course Restored Successfully",
    )))
}

/// List trashed courses
#[utoipa::path(
    get,
    path = "/v1/trashed/courses",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of trashed courses"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn trashed_courses(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Course>>, AppError> {
    let (courses, total) = CourseService::trashed(&state.db, &params).await?;
    let pagination = Pagination::new(total, courses.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        courses,
        pagination,
        "Trashed Courses",
    )))
}

/// Permanently delete a trashed course
#[utoipa::path(
    delete,
    path = "/v1/courses/force-delete/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course purged"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin))]
pub async fn force_delete_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CourseService::force_delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Course Deleted Successfully")))
}

/// Show a course with its instructors
#[utoipa::path(
    get,
    path = "/v1/courses/{id}/instructors",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with instructors loaded"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn course_instructors(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseWithInstructors>>, AppError> {
    let course = CourseService::with_instructors(&state.db, id).await?;
    Ok(Json(ApiResponse::success(course, "Operation Done")))
}

/// Show a course with its students
#[utoipa::path(
    get,
    path = "/v1/courses/{id}/students",
    params(("id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course with students loaded"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _ctx))]
pub async fn course_students(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CourseWithStudents>>, AppError> {
    let course = CourseService::with_students(&state.db, id).await?;
    Ok(Json(ApiResponse::success(course, "Operation Done")))
}

/// Assign instructors to a course
#[utoipa::path(
    post,
    path = "/v1/courses/assign-course-instructor/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = AssignInstructorsDto,
    responses(
        (status = 200, description = "Course with instructors after the assignment"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Unknown instructor id")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn assign_course_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignInstructorsDto>,
) -> Result<Json<ApiResponse<CourseWithInstructors>>, AppError> {
    let course = CourseService::assign_instructors(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        course,
        "Course Assigned To Instructor Successfully",
    )))
}

/// Unassign instructors from a course
#[utoipa::path(
    post,
    path = "/v1/courses/unassign-course-instructor/{id}",
    params(("id" = Uuid, Path, description = "Course ID")),
    request_body = AssignInstructorsDto,
    responses(
        (status = 200, description = "Course with instructors after the removal"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Course not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn unassign_course_instructor(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignInstructorsDto>,
) -> Result<Json<ApiResponse<CourseWithInstructors>>, AppError> {
    let course = CourseService::unassign_instructors(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        course,
        "Course Unassigned From Instructor Successfully",
    )))
}
