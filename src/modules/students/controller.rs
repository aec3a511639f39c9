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
    AssignCoursesDto, CreateStudentDto, Student, StudentWithCourses, UpdateStudentDto,
};
use super::service::StudentService;

/// List students
#[utoipa::path(
    get,
    path = "/v1/students",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of active students"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _ctx))]
pub async fn list_students(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Student>>, AppError> {
    let (students, total) = StudentService::list(&state.db, &params).await?;
    let pagination = Pagination::new(total, students.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        students,
        pagination,
        "Operation Success",
    )))
}

/// Create a student
#[utoipa::path(
    post,
    path = "/v1/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student created"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 422, description = "Validation error or email already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let student = StudentService::create(&state.db, dto).await?;
    Ok(Json(ApiResponse::success(
        student,
        "Student Created Successfully",
    )))
}

/// Show a student
#[utoipa::path(
    get,
    path = "/v1/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _ctx))]
pub async fn get_student(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let student = StudentService::get(&state.db, id).await?;
    Ok(Json(ApiResponse::success(student, "Operation Done")))
}

/// Update a student
#[utoipa::path(
    put,
    path = "/v1/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Validation error or email already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let student = StudentService::update(&state.db, id, dto).await?;
    Ok(Json(ApiResponse::success(
        student,
        "Student Updated Successfully",
    )))
}

/// Soft-delete a student
#[utoipa::path(
    delete,
    path = "/v1/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student trashed"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StudentService::delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Student Deleted Successfully")))
}

/// Restore a trashed student
#[utoipa::path(
    post,
    path = "/v1/students/restore/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student restored"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn restore_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Student>>, AppError> {
    let student = StudentService::restore(&state.db, id).await?;
    Ok(Json(ApiResponse::success(
        student,
        "Student Restored Successfully",
    )))
}

/// List trashed students
#[utoipa::path(
    get,
    path = "/v1/trashed/students",
    params(("page" = Option<i64>, Query), ("per_page" = Option<i64>, Query)),
    responses(
        (status = 200, description = "Paginated list of trashed students"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _ctx))]
pub async fn trashed_students(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<Student>>, AppError> {
    let (students, total) = StudentService::trashed(&state.db, &params).await?;
    let pagination = Pagination::new(total, students.len(), params.per_page(), params.page());
    Ok(Json(PaginatedResponse::success(
        students,
        pagination,
        "Trashed Students",
    )))
}

/// Permanently delete a trashed student
#[utoipa::path(
    delete,
    path = "/v1/students/force-delete/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student purged"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found among trashed rows")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn force_delete_student(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    StudentService::force_delete(&state.db, id).await?;
    Ok(Json(ApiResponse::message("Student Deleted Successfully")))
}

/// Show a student with their courses
#[utoipa::path(
    get,
    path = "/v1/students/{id}/courses",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student with courses loaded"),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _ctx))]
pub async fn student_courses(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<StudentWithCourses>>, AppError> {
    let student = StudentService::with_courses(&state.db, id).await?;
    Ok(Json(ApiResponse::success(student, "Operation Done")))
}

/// Assign courses to a student
#[utoipa::path(
    post,
    path = "/v1/students/assign-student-course/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = AssignCoursesDto,
    responses(
        (status = 200, description = "Student with courses after the assignment"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Unknown course id")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn assign_student_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCoursesDto>,
) -> Result<Json<ApiResponse<StudentWithCourses>>, AppError> {
    let student = StudentService::assign_courses(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        student,
        "Student Assigned To Course Successfully",
    )))
}

/// Unassign courses from a student
#[utoipa::path(
    post,
    path = "/v1/students/unassign-student-course/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = AssignCoursesDto,
    responses(
        (status = 200, description = "Student with courses after the removal"),
        (status = 401, description = "Unauthenticated or not an admin"),
        (status = 404, description = "Student not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn unassign_student_course(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCoursesDto>,
) -> Result<Json<ApiResponse<StudentWithCourses>>, AppError> {
    let student = StudentService::unassign_courses(&state.db, id, &dto.ids()).await?;
    Ok(Json(ApiResponse::success(
        student,
        "Student Unassigned From Course Successfully",
    )))
}
