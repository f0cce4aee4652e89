//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real access token with the test secret, so requests
//! pass through the same `Identity` extractor production traffic does.

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use yamdb_auth_types::token::{JwtSecret, issue_access_token};
use yamdb_domain::user::UserRole;

/// Secret shared by `MockAuth` and test routers.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

pub fn test_secret() -> JwtSecret {
    JwtSecret::new(TEST_JWT_SECRET)
}

/// Credentials for a stored user. Requests are authorized against the
/// user row, so `user_id` must name a seeded account.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// A signed bearer token for this identity.
    pub fn token(&self) -> String {
        let (token, _) = issue_access_token(self.user_id, self.role, &test_secret())
            .expect("sign test token");
        token
    }

    /// `Authorization` header as a `(name, value)` pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("bearer header value");
        (AUTHORIZATION, value)
    }
}
