mod middleware;
mod token;

pub use middleware::{AuthError, RequireToken};
pub use token::{generate_token, token_at, verify_token};
