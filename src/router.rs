use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

use crate::docs::ApiDoc;
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::controller::trashed_courses;
use crate::modules::courses::router::init_courses_router;
use crate::modules::instructors::controller::{
    assign_instructor_course, trashed_instructors, unassign_instructor_course,
};
use crate::modules::instructors::router::init_instructors_router;
use crate::modules::students::controller::trashed_students;
use crate::modules::students::router::init_students_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/auth/v1", init_auth_router())
        .nest(
            "/v1",
            Router::new()
                .nest("/courses", init_courses_router())
                .nest("/instructors", init_instructors_router())
                .nest("/students", init_students_router())
                .route("/trashed/courses", get(trashed_courses))
                .route("/trashed/instructors", get(trashed_instructors))
                .route("/trashed/students", get(trashed_students))
                // Instructor assignment lives at the version root rather than
                // under /instructors.
                .route(
                    "/assign-instructor-course/{id}",
                    post(assign_instructor_course),
                )
                .route(
                    "/unassign-instructor-course/{id}",
                    post(unassign_instructor_course),
                ),
        )
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ]),
        )
        .layer(TraceLayer::new_for_http())
}
