use anyhow::anyhow;
use tracing::instrument;
use yoga_core::AppError;
use yoga_db::Store;
use yoga_models::TeacherId;

use crate::modules::teachers::model::Teacher;

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(store))]
    pub async fn get_teachers(store: &Store) -> Result<Vec<Teacher>, AppError> {
        Ok(store.teachers.list_teachers().await?)
    }

    #[instrument(skip(store))]
    pub async fn get_teacher_by_id(store: &Store, id: TeacherId) -> Result<Teacher, AppError> {
        store
            .teachers
            .find_teacher(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Teacher not found")))
    }
}
