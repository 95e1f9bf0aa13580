use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use yoga_core::AppError;
use yoga_models::UserId;

use crate::middleware::auth::AuthUser;
use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    let user = UserService::get_user_by_id(&state.store, id).await?;
    Ok(Json(user))
}

/// Delete your own account
#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Account deleted"),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized, or not the caller's account"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(caller = %auth_user.email()))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<StatusCode, AppError> {
    let caller = auth_user.user_id()?;
    UserService::delete_user(&state.store, id, caller).await?;
    Ok(StatusCode::OK)
}
