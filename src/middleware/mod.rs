mod auth;
mod error_handler;

pub use auth::{Authenticator, Identity, auth_middleware, parse_bearer};
pub use error_handler::log_errors;
