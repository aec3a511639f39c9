mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_admin_user, create_course, create_instructor, create_student, generate_unique_email,
    get_auth_token, setup_test_app,
};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn admin_token(pool: &PgPool) -> String {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_admin_user(&mut tx, &email, "testpass123").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    get_auth_token(app, &email, "testpass123").await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_as_admin(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/v1/courses")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Distributed Systems",
                "description": "Consensus, replication and failure models",
                "start_date": "2026-09-01T09:00:00Z"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Course Created Successfully");
    assert_eq!(body["data"]["title"], "Distributed Systems");
    assert!(body["data"]["deleted_at"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_course_as_student_unauthorized(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_student(&mut tx, &email, "studentpass").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "studentpass").await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/v1/courses")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Not Allowed",
                "description": "Students cannot create courses",
                "start_date": "2026-09-01T09:00:00Z"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_courses_excludes_trashed(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let kept = create_course(&mut tx, "Kept Course").await;
    let trashed = create_course(&mut tx, "Trashed Course").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/courses/{}", trashed))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/v1/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], kept.to_string());
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["count"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_delete_lifecycle(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Lifecycle Course").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    // Trash it.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Trashed rows are invisible to the default fetch.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // But they show up in the trashed listing.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/v1/trashed/courses")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "Trashed Courses");
    assert_eq!(body["data"][0]["id"], course_id.to_string());

    // Restore brings it back.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/courses/restore/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_force_delete_active_course_is_rejected(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Active Course").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    // Purging an active row answers 404 and leaves it untouched.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/courses/force-delete/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_force_delete_trashed_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Doomed Course").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/courses/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/courses/force-delete/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Gone for good, restore has nothing to match.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/courses/restore/{}", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_course_partial(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Original Title").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/v1/courses/{}", course_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "title": "Renamed Title"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["data"]["title"], "Renamed Title");
    assert_eq!(body["data"]["description"], "Test course description");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_instructors_is_idempotent(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Algorithms").await;
    let instructor_id = create_instructor(&mut tx, "Prof. Karger").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;
    let payload = serde_json::to_string(&json!({
        "instructors": [{ "id": instructor_id }]
    }))
    .unwrap();

    for _ in 0..2 {
        let app = setup_test_app(pool.clone()).await;
        let request = Request::builder()
            .method("POST")
            .uri(format!("/v1/courses/assign-course-instructor/{}", course_id))
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(payload.clone()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}/instructors", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Repeating the assignment must not duplicate the edge.
    assert_eq!(body["data"]["instructors"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_assign_unknown_instructor_rolls_back(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Databases").await;
    let instructor_id = create_instructor(&mut tx, "Prof. Stonebraker").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    // Valid id first, bogus id second: nothing may be applied.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/courses/assign-course-instructor/{}", course_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "instructors": [
                    { "id": instructor_id },
                    { "id": Uuid::new_v4() }
                ]
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}/instructors", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["data"]["instructors"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unassign_missing_edge_is_noop(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Networks").await;
    let instructor_id = create_instructor(&mut tx, "Prof. Cerf").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    // Instructor exists but was never assigned; removal is a silent no-op.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri(format!(
            "/v1/courses/unassign-course-instructor/{}",
            course_id
        ))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "instructors": [{ "id": instructor_id }]
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_students_view(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let course_id = create_course(&mut tx, "Operating Systems").await;
    let student_id = create_student(&mut tx, &generate_unique_email(), "studentpass").await;
    tx.commit().await.unwrap();

    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri(format!("/v1/students/assign-student-course/{}", student_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "courses": [{ "id": course_id }]
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/v1/courses/{}/students", course_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let students = body["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], student_id.to_string());
}
