use serde::{Deserialize, Serialize};
use tessera_core::models::{User, UserRole};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: i64, // user id
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Authenticated caller, stored in request extensions by the session middleware
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl From<SessionClaims> for AuthContext {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user: User {
                id: claims.sub,
                username: claims.username,
                email: claims.email,
                role: claims.role,
            },
        }
    }
}
