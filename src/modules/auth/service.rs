use anyhow::anyhow;
use tracing::{info, instrument, warn};
use yoga_auth::{TOKEN_TYPE, create_access_token};
use yoga_core::{AppError, hash_password, verify_password};
use yoga_db::{Store, StoreError};
use yoga_models::NewUser;

use crate::config::JwtConfig;

use super::model::{LoginRequest, MessageResponse, SessionInformation, SignupRequest};

const EMAIL_TAKEN: &str = "Error: Email is already taken!";

pub struct AuthService;

impl AuthService {
    /// Registers a non-admin account.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register_user(
        store: &Store,
        dto: SignupRequest,
    ) -> Result<MessageResponse, AppError> {
        if store.users.email_exists(&dto.email).await? {
            return Err(AppError::bad_request(anyhow!(EMAIL_TAKEN)));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = store
            .users
            .create_user(NewUser {
                email: dto.email,
                first_name: dto.first_name,
                last_name: dto.last_name,
                password_hash,
                admin: false,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateEmail(_) => AppError::bad_request(anyhow!(EMAIL_TAKEN)),
                other => AppError::from(other),
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(MessageResponse::new("User registered successfully!"))
    }

    /// Checks the password and issues an access token.
    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        store: &Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<SessionInformation, AppError> {
        let Some(user) = store.users.find_credentials_by_email(&dto.email).await? else {
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!("Login attempt with wrong password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token =
            create_access_token(user.id.into_inner(), &user.email, user.admin, jwt_config)?;

        Ok(SessionInformation {
            token,
            token_type: TOKEN_TYPE.to_string(),
            id: user.id,
            username: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            admin: user.admin,
        })
    }
}
