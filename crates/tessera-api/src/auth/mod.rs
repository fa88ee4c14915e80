//! Authentication
//!
//! A session token (HS256 JWT) is read from the `Authorization: Bearer` header
//! or the `session` cookie. [`middleware::session_middleware`] turns a valid
//! token into an [`models::AuthContext`] in the request extensions; requests
//! without one proceed anonymously. Routes that need an administrator are
//! wrapped in [`middleware::require_admin`].

pub mod jwt;
pub mod middleware;
pub mod models;

pub use jwt::JwtKeys;
pub use middleware::{require_admin, session_middleware};
pub use models::{AuthContext, SessionClaims};
