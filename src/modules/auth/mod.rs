//! Authentication module: account registration and password login.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
