//! Authentication
//!
//! Bearer-token validation and caller identity extraction.

pub mod jwt;
pub mod middleware;

pub use jwt::{current_user, Claims, CurrentUser, TokenService};
pub use middleware::auth_middleware;
