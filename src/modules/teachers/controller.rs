use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use yoga_core::AppError;
use yoga_models::TeacherId;

use crate::middleware::auth::AuthUser;
use crate::modules::teachers::model::Teacher;
use crate::modules::teachers::service::TeacherService;
use crate::state::AppState;

/// List all teachers
#[utoipa::path(
    get,
    path = "/api/teacher",
    responses(
        (status = 200, description = "All teachers, ascending by id", body = Vec<Teacher>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_teachers(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Teacher>>, AppError> {
    let teachers = TeacherService::get_teachers(&state.store).await?;
    Ok(Json(teachers))
}

/// Get a teacher by ID
#[utoipa::path(
    get,
    path = "/api/teacher/{id}",
    params(
        ("id" = i64, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "Teacher details", body = Teacher),
        (status = 400, description = "Non-numeric ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher not found")
    ),
    tag = "Teachers",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_teacher_by_id(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<TeacherId>,
) -> Result<Json<Teacher>, AppError> {
    let teacher = TeacherService::get_teacher_by_id(&state.store, id).await?;
    Ok(Json(teacher))
}
