//! Mock auth helpers for tests.
//!
//! The recipes service sits behind a gateway that injects `x-foodgram-user-id` +
//! `x-foodgram-user-role` headers. In tests, `MockAuth` produces these headers
//! directly so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use foodgram_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    /// A regular (non-admin) user with a fresh id.
    pub fn user() -> Self {
        Self::new(Uuid::new_v4(), UserRole::User)
    }

    /// An admin with a fresh id.
    pub fn admin() -> Self {
        Self::new(Uuid::new_v4(), UserRole::Admin)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static("x-foodgram-user-id"),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static("x-foodgram-user-role"),
            HeaderValue::from(u16::from(self.user_role.as_u8())),
        );
        map
    }
}
