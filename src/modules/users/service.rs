use anyhow::anyhow;
use tracing::{info, instrument};
use yoga_core::AppError;
use yoga_db::Store;
use yoga_models::UserId;

use crate::modules::users::model::User;

pub struct UserService;

impl UserService {
    #[instrument(skip(store))]
    pub async fn get_user_by_id(store: &Store, id: UserId) -> Result<User, AppError> {
        store
            .users
            .find_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    /// Deletes the account at `id`. Only its owner may do so: any other
    /// caller gets 401, checked after the 404 for a missing account.
    #[instrument(skip(store))]
    pub async fn delete_user(store: &Store, id: UserId, caller: UserId) -> Result<(), AppError> {
        let user = Self::get_user_by_id(store, id).await?;

        if user.id != caller {
            return Err(AppError::unauthorized("You can only delete your own account"));
        }

        // A concurrent delete may have won the race; report it as missing.
        if !store.users.delete_user(id).await? {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
