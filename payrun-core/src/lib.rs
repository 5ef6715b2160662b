pub mod derivation;
pub mod models;
pub mod service;

pub use derivation::{InputField, InputState, clamp};
pub use models::*;
pub use service::{PayrunService, ServiceError};
