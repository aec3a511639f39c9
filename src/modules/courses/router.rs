use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_course_instructor, course_instructors, course_students, create_course, delete_course,
    force_delete_course, get_course, list_courses, restore_course, unassign_course_instructor,
    update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/restore/{id}", post(restore_course))
        .route("/force-delete/{id}", delete(force_delete_course))
        .route("/{id}/instructors", get(course_instructors))
        .route("/{id}/students", get(course_students))
        .route(
            "/assign-course-instructor/{id}",
            post(assign_course_instructor),
        )
        .route(
            "/unassign-course-instructor/{id}",
            post(unassign_course_instructor),
        )
}
