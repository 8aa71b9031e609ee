//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real token with the test secret, so requests go through
//! the same bearer parsing and verification as production traffic.

use encore_auth_types::token::TokenService;
use encore_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";
pub const TEST_JWT_TTL_SECS: u64 = 3600;

pub fn test_token_service() -> TokenService {
    TokenService::new(TEST_JWT_SECRET, TEST_JWT_TTL_SECS)
}

/// Identity carried by a test request.
pub struct MockAuth {
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(username: &str, email: &str, role: UserRole) -> Self {
        Self {
            username: username.to_owned(),
            email: email.to_owned(),
            role,
        }
    }

    pub fn token(&self) -> String {
        test_token_service()
            .issue(&self.username, &self.email, self.role)
            .expect("sign test token")
            .token
    }

    /// `Authorization` header value for this identity.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}
