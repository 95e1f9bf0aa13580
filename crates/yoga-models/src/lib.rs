//! # Yoga Models
//!
//! Domain models and DTOs for the yoga studio API: database entities,
//! request/response bodies and their validation rules.
//!
//! # Modules
//!
//! - [`auth`]: Login and registration DTOs
//! - [`ids`]: Strongly-typed identifiers
//! - [`sessions`]: Yoga sessions and their input DTO
//! - [`teachers`]: Teachers
//! - [`users`]: Users and credentials

pub mod auth;
pub mod ids;
pub mod sessions;
pub mod teachers;
pub mod users;

pub use auth::{Claims, LoginRequest, MessageResponse, SessionInformation, SignupRequest};
pub use ids::{SessionId, TeacherId, UserId};
pub use sessions::{Session, SessionData, SessionDto};
pub use teachers::Teacher;
pub use users::{NewUser, User, UserCredentials};
