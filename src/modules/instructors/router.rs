use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    create_instructor, delete_instructor, force_delete_instructor, get_instructor,
    instructor_courses, instructor_students, list_instructors, restore_instructor,
    update_instructor,
};

pub fn init_instructors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_instructors).post(create_instructor))
        .route(
            "/{id}",
            get(get_instructor)
                .put(update_instructor)
                .delete(delete_instructor),
        )
        .route("/restore/{id}", post(restore_instructor))
        .route("/force-delete/{id}", delete(force_delete_instructor))
        .route("/{id}/courses", get(instructor_courses))
        .route("/{id}/students", get(instructor_students))
}
