//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use foodgram_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// Caller identity injected by the gateway via `x-foodgram-user-id` and
/// `x-foodgram-user-role` headers.
///
/// As a required extractor it returns 401 if either header is absent or malformed.
/// As `Option<IdentityHeaders>` it yields `None` when `x-foodgram-user-id` is absent
/// (anonymous caller) and still rejects malformed values with 401.
#[derive(Debug, Clone, Copy)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

enum Parsed {
    Absent,
    Invalid,
    Valid(IdentityHeaders),
}

fn parse_headers(parts: &Parts) -> Parsed {
    let Some(raw_user_id) = parts.headers.get(USER_ID_HEADER) else {
        return Parsed::Absent;
    };
    let user_id = raw_user_id
        .to_str()
        .ok()
        .and_then(|s| s.parse::<Uuid>().ok());
    let user_role = parts
        .headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u8>().ok())
        .and_then(UserRole::from_u8);

    match (user_id, user_role) {
        (Some(user_id), Some(user_role)) => Parsed::Valid(IdentityHeaders { user_id, user_role }),
        _ => {
            tracing::debug!("rejecting malformed identity headers");
            Parsed::Invalid
        }
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously, then return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let parsed = parse_headers(parts);
        async move {
            match parsed {
                Parsed::Valid(identity) => Ok(identity),
                Parsed::Absent | Parsed::Invalid => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let parsed = parse_headers(parts);
        async move {
            match parsed {
                Parsed::Valid(identity) => Ok(Some(identity)),
                Parsed::Absent => Ok(None),
                Parsed::Invalid => Err(StatusCode::UNAUTHORIZED),
            }
        }
    }
}
