//! Yoga sessions module.
//!
//! Sessions are scheduled classes with an optional teacher and a set of
//! participating users. Members join and leave through the `participate`
//! sub-resource.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
