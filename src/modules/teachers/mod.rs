//! Teachers module. Teachers are read-only through the API.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
