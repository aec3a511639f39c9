use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_student_course, create_student, delete_student, force_delete_student, get_student,
    list_students, restore_student, student_courses, unassign_student_course, update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/restore/{id}", post(restore_student))
        .route("/force-delete/{id}", delete(force_delete_student))
        .route("/{id}/courses", get(student_courses))
        .route("/assign-student-course/{id}", post(assign_student_course))
        .route(
            "/unassign-student-course/{id}",
            post(unassign_student_course),
        )
}
