pub mod auth;
pub mod cors;

pub use auth::{current_user, AuthMiddleware};
pub use cors::create_cors;
