use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    LoginRequest, MessageResponse, SessionInformation, SignupRequest,
};
use crate::modules::sessions::model::{Session, SessionDto};
use crate::modules::teachers::model::Teacher;
use crate::modules::users::model::User;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::sessions::controller::get_sessions,
        crate::modules::sessions::controller::get_session_by_id,
        crate::modules::sessions::controller::create_session,
        crate::modules::sessions::controller::update_session,
        crate::modules::sessions::controller::delete_session,
        crate::modules::sessions::controller::participate,
        crate::modules::sessions::controller::no_longer_participate,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher_by_id,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            Session,
            SessionDto,
            Teacher,
            User,
            LoginRequest,
            SignupRequest,
            SessionInformation,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Sessions", description = "Yoga sessions and participation"),
        (name = "Teachers", description = "Studio teachers"),
        (name = "Users", description = "User accounts")
    ),
    info(
        title = "Yoga Studio API",
        version = "0.1.0",
        description = "Session booking API for a yoga studio, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
