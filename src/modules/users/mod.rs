//! User accounts module.
//!
//! Accounts are created through `/api/auth/register`; this module exposes
//! lookup and self-service deletion.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
