pub use yoga_models::teachers::*;
