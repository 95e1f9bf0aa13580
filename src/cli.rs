//! Administrative commands run from the binary rather than the API.

use anyhow::{Context, bail};
use yoga_core::hash_password;
use yoga_db::{Store, StoreError};
use yoga_models::{NewUser, User};

/// Creates an administrator account. Admins cannot be registered through
/// the API.
pub async fn create_admin(
    store: &Store,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let password_hash =
        hash_password(password).map_err(|e| e.error.context("Failed to hash password"))?;

    let user = store
        .users
        .create_user(NewUser {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            password_hash,
            admin: true,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail(email) => {
                anyhow::anyhow!("User with email {email} already exists")
            }
            other => anyhow::Error::from(other),
        })
        .context("Failed to create admin")?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoga_db::MemoryStore;

    #[tokio::test]
    async fn test_create_admin() {
        let store = Store::in_memory(MemoryStore::new());
        let user = create_admin(&store, "Root", "Admin", "root@studio.com", "secret1")
            .await
            .unwrap();

        assert!(user.admin);
        assert!(store.users.email_exists("root@studio.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_admin_rejects_duplicate_email() {
        let store = Store::in_memory(MemoryStore::seeded().unwrap());
        let err = create_admin(&store, "Root", "Admin", "yoga@studio.com", "secret1")
            .await
            .unwrap_err();

        assert!(format!("{err:#}").contains("already exists"));
    }

    #[tokio::test]
    async fn test_create_admin_rejects_short_password() {
        let store = Store::in_memory(MemoryStore::new());
        assert!(
            create_admin(&store, "Root", "Admin", "root@studio.com", "123")
                .await
                .is_err()
        );
    }
}
