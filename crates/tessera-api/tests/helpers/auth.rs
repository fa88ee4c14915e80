use tessera_api::auth::JwtKeys;
use tessera_core::models::{User, UserRole};

use super::TEST_JWT_SECRET;

pub fn admin_user() -> User {
    User {
        id: 1,
        username: "admin".to_string(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
    }
}

pub fn member_user() -> User {
    User {
        id: 2,
        username: "member".to_string(),
        email: "member@example.com".to_string(),
        role: UserRole::Member,
    }
}

pub fn token_for(user: &User) -> String {
    JwtKeys::new(TEST_JWT_SECRET)
        .issue_token(user)
        .expect("Failed to issue token")
}

/// `Authorization` header value for the administrator
pub fn admin_bearer() -> String {
    format!("Bearer {}", token_for(&admin_user()))
}

pub fn member_bearer() -> String {
    format!("Bearer {}", token_for(&member_user()))
}
