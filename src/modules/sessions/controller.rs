use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use yoga_core::AppError;
use yoga_models::{SessionId, UserId};

use crate::middleware::auth::AuthUser;
use crate::modules::sessions::model::{Session, SessionDto};
use crate::modules::sessions::service::SessionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all sessions
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "All sessions, ascending by id", body = Vec<Session>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_sessions(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = SessionService::get_sessions(&state.store).await?;
    Ok(Json(sessions))
}

/// Get a session by ID
#[utoipa::path(
    get,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = Session),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_session_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<SessionId>,
) -> Result<Json<Session>, AppError> {
    let session = SessionService::get_session_by_id(&state.store, id).await?;
    Ok(Json(session))
}

/// Create a session
#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SessionDto,
    responses(
        (status = 200, description = "Session created", body = Session),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn create_session(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SessionDto>,
) -> Result<Json<Session>, AppError> {
    let session = SessionService::create_session(&state.store, dto).await?;
    Ok(Json(session))
}

/// Replace a session, creating it under the given ID when absent
#[utoipa::path(
    put,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    request_body = SessionDto,
    responses(
        (status = 200, description = "Session updated", body = Session),
        (status = 400, description = "Invalid input, or ID not numeric or out of range"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn update_session(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<SessionId>,
    ValidatedJson(dto): ValidatedJson<SessionDto>,
) -> Result<Json<Session>, AppError> {
    let session = SessionService::update_session(&state.store, id, dto).await?;
    Ok(Json(session))
}

/// Delete a session
#[utoipa::path(
    delete,
    path = "/api/session/{id}",
    params(
        ("id" = i64, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session deleted"),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Session not found")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_session(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    SessionService::delete_session(&state.store, id).await?;
    Ok(StatusCode::OK)
}

/// Sign a user up for a session
#[utoipa::path(
    post,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = i64, Path, description = "Session ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User participates (no-op if already participating or unknown)"),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn participate(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((id, user_id)): Path<(SessionId, UserId)>,
) -> Result<StatusCode, AppError> {
    SessionService::participate(&state.store, id, user_id).await?;
    Ok(StatusCode::OK)
}

/// Withdraw a user from a session
#[utoipa::path(
    delete,
    path = "/api/session/{id}/participate/{user_id}",
    params(
        ("id" = i64, Path, description = "Session ID"),
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User no longer participates"),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Sessions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn no_longer_participate(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((id, user_id)): Path<(SessionId, UserId)>,
) -> Result<StatusCode, AppError> {
    SessionService::no_longer_participate(&state.store, id, user_id).await?;
    Ok(StatusCode::OK)
}
