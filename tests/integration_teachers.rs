mod common;

use axum::http::StatusCode;
use common::{admin_token, get, send, setup_test_app, token_for};

#[tokio::test]
async fn test_list_teachers() {
    let app = setup_test_app();
    let (status, body) = get(&app, "/api/teacher", &admin_token()).await;

    assert_eq!(status, StatusCode::OK);
    let teachers = body.as_array().unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0]["id"], 1);
    assert_eq!(teachers[0]["last_name"], "DELAHAYE");
    assert_eq!(teachers[1]["first_name"], "Hélène");
}

#[tokio::test]
async fn test_get_teacher_by_id() {
    let app = setup_test_app();
    let token = token_for(2, "jean.martin@studio.com", false);
    let (status, body) = get(&app, "/api/teacher/2", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["last_name"], "THIERCELIN");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_get_unknown_teacher_is_not_found() {
    let app = setup_test_app();
    let (status, body) = get(&app, "/api/teacher/99", &admin_token()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Teacher not found");
}

#[tokio::test]
async fn test_get_teacher_non_numeric_id_is_bad_request() {
    let app = setup_test_app();
    let (status, _) = get(&app, "/api/teacher/margot", &admin_token()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_teacher_routes_require_token() {
    let app = setup_test_app();

    let (status, _) = send(&app, "GET", "/api/teacher", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/teacher/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
