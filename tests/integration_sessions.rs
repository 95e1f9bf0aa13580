mod common;

use axum::http::StatusCode;
use common::{
    CLAIRE_ID, JEAN_ID, admin_token, delete, get, post, put, send, setup_test_app, token_for,
};
use serde_json::{Value, json};

fn session_body(name: &str, teacher_id: i64) -> Value {
    json!({
        "name": name,
        "date": "2024-09-01T09:00:00Z",
        "teacher_id": teacher_id,
        "description": "Hatha yoga for beginners"
    })
}

#[tokio::test]
async fn test_get_seeded_session() {
    let app = setup_test_app();
    let (status, body) = get(&app, "/api/session/1", &admin_token()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Séance de Yoga matin");
    assert_eq!(body["teacher_id"], 1);
    assert_eq!(
        body["description"],
        "Une séance de yoga revitalisante pour bien commencer la journée."
    );
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn test_get_unknown_session_is_not_found() {
    let app = setup_test_app();
    let (status, body) = get(&app, "/api/session/9999", &admin_token()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");
}

#[tokio::test]
async fn test_get_non_numeric_id_is_bad_request() {
    let app = setup_test_app();
    let (status, _) = get(&app, "/api/session/abc", &admin_token()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sessions_in_id_order_and_each_round_trips() {
    let app = setup_test_app();
    let token = admin_token();
    let (status, body) = get(&app, "/api/session", &token).await;

    assert_eq!(status, StatusCode::OK);
    let sessions = body.as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["id"], 1);
    assert_eq!(sessions[1]["id"], 2);
    assert_eq!(sessions[1]["users"], json!([CLAIRE_ID]));

    for session in sessions {
        let uri = format!("/api/session/{}", session["id"]);
        let (status, fetched) = get(&app, &uri, &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&fetched, session);
    }
}

#[tokio::test]
async fn test_list_empty_store_returns_empty_array() {
    let app = common::setup_test_app_with_store(yoga_db::Store::in_memory(
        yoga_db::MemoryStore::new(),
    ));
    let (status, body) = get(&app, "/api/session", &admin_token()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_then_get_returns_input_fields() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, created) = post(&app, "/api/session", &token, session_body("Hatha", 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 3);
    assert_eq!(created["name"], "Hatha");
    assert_eq!(created["teacher_id"], 2);
    assert_eq!(created["description"], "Hatha yoga for beginners");
    assert_eq!(created["date"], "2024-09-01T09:00:00Z");
    assert_eq!(created["users"], json!([]));

    let (status, fetched) = get(&app, "/api/session/3", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_accepts_epoch_millis_date() {
    let app = setup_test_app();
    let mut body = session_body("Yin", 1);
    body["date"] = json!(1725181200000_i64);

    let (status, created) = post(&app, "/api/session", &admin_token(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["date"], "2024-09-01T09:00:00Z");
}

#[tokio::test]
async fn test_create_with_unknown_teacher_stores_null() {
    let app = setup_test_app();
    let (status, created) =
        post(&app, "/api/session", &admin_token(), session_body("Yin", 42)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(created["teacher_id"].is_null());
}

#[tokio::test]
async fn test_create_seeds_participants_and_drops_unknown() {
    let app = setup_test_app();
    let mut body = session_body("Kundalini", 1);
    body["users"] = json!([CLAIRE_ID, 500, JEAN_ID]);

    let (status, created) = post(&app, "/api/session", &admin_token(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["users"], json!([JEAN_ID, CLAIRE_ID]));
}

#[tokio::test]
async fn test_create_rejects_long_name() {
    let app = setup_test_app();
    let (status, body) = post(
        &app,
        "/api/session",
        &admin_token(),
        session_body(&"n".repeat(51), 1),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name must be at most 50 characters");
}

#[tokio::test]
async fn test_create_rejects_long_description() {
    let app = setup_test_app();
    let mut body = session_body("Yin", 1);
    body["description"] = json!("d".repeat(2501));

    let (status, _) = post(&app, "/api/session", &admin_token(), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_blank_name() {
    let app = setup_test_app();
    let (status, _) = post(&app, "/api/session", &admin_token(), session_body("  ", 1)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_date_and_teacher() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, body) = post(
        &app,
        "/api/session",
        &token,
        json!({ "name": "Yin", "teacher_id": 1, "description": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "date is required");

    let (status, body) = post(
        &app,
        "/api/session",
        &token,
        json!({ "name": "Yin", "date": "2024-09-01T09:00:00Z", "description": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "teacher_id is required");
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_participants() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, updated) =
        put(&app, "/api/session/2", &token, session_body("Soir calme", 1)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["name"], "Soir calme");
    assert_eq!(updated["teacher_id"], 1);
    assert_eq!(updated["users"], json!([CLAIRE_ID]));
}

#[tokio::test]
async fn test_update_with_users_replaces_participants() {
    let app = setup_test_app();
    let mut body = session_body("Soir", 2);
    body["users"] = json!([JEAN_ID]);

    let (status, updated) = put(&app, "/api/session/2", &admin_token(), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["users"], json!([JEAN_ID]));
}

#[tokio::test]
async fn test_update_unknown_id_creates_session() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, created) = put(&app, "/api/session/77", &token, session_body("New", 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 77);

    let (status, fetched) = get(&app, "/api/session/77", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "New");
}

#[tokio::test]
async fn test_update_with_max_id_is_bad_request() {
    let app = setup_test_app();
    let token = admin_token();
    let uri = format!("/api/session/{}", i64::MAX);

    let (status, body) = put(&app, &uri, &token, session_body("Edge", 1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid session id");

    let (status, created) = post(&app, "/api/session", &token, session_body("Next", 1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn test_update_validates_body() {
    let app = setup_test_app();
    let (status, _) = put(
        &app,
        "/api/session/1",
        &admin_token(),
        session_body(&"n".repeat(51), 1),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, _) = delete(&app, "/api/session/1", &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/session/1", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/api/session/1", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_participate_then_withdraw() {
    let app = setup_test_app();
    let token = token_for(JEAN_ID, "jean.martin@studio.com", false);

    let (status, _) = post(&app, "/api/session/1/participate/2", &token, json!(null)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, session) = get(&app, "/api/session/1", &token).await;
    assert_eq!(session["users"], json!([JEAN_ID]));

    let (status, _) = delete(&app, "/api/session/1/participate/2", &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, session) = get(&app, "/api/session/1", &token).await;
    assert_eq!(session["users"], json!([]));
}

#[tokio::test]
async fn test_participate_twice_is_idempotent() {
    let app = setup_test_app();
    let token = admin_token();

    for _ in 0..2 {
        let (status, _) =
            send(&app, "POST", "/api/session/2/participate/2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, session) = get(&app, "/api/session/2", &token).await;
    assert_eq!(session["users"], json!([JEAN_ID, CLAIRE_ID]));
}

#[tokio::test]
async fn test_participate_with_unknown_ids_is_noop() {
    let app = setup_test_app();
    let token = admin_token();

    let (status, _) =
        send(&app, "POST", "/api/session/1/participate/404", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) =
        send(&app, "POST", "/api/session/404/participate/2", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = delete(&app, "/api/session/1/participate/3", &token).await;
    assert_eq!(status, StatusCode::OK);

    let (_, session) = get(&app, "/api/session/1", &token).await;
    assert_eq!(session["users"], json!([]));
}

#[tokio::test]
async fn test_session_routes_require_token() {
    let app = setup_test_app();

    let requests = [
        ("GET", "/api/session"),
        ("GET", "/api/session/1"),
        ("POST", "/api/session"),
        ("PUT", "/api/session/1"),
        ("DELETE", "/api/session/1"),
        ("POST", "/api/session/1/participate/2"),
        ("DELETE", "/api/session/1/participate/2"),
    ];

    for (method, uri) in requests {
        let (status, body) = send(&app, method, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body["error"], "Missing authorization header");
    }
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = setup_test_app();
    let (status, body) = get(&app, "/api/session", "not.a.jwt").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}
