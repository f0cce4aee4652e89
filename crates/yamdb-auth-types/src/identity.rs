//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use yamdb_domain::user::UserRole;

use crate::token::{JwtSecret, validate_access_token};

/// Authenticated caller, taken from an `Authorization: Bearer <jwt>` header.
///
/// Rejects with 401 if the header is absent or the token fails validation.
/// `role` is the role at issue time; services that enforce access should
/// read the current role from their own store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityRejection {
    #[error("authentication credentials were not provided")]
    MissingToken,
    #[error("token is invalid or expired")]
    InvalidToken,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": "UNAUTHORIZED",
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = IdentityRejection;

    // Extract synchronously and hand back a 'static future so the returned
    // future does not borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            None => Err(IdentityRejection::MissingToken),
            Some(Authorization(bearer)) => validate_access_token(bearer.token(), &secret)
                .map(|info| Identity {
                    user_id: info.user_id,
                    role: info.role,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer token");
                    IdentityRejection::InvalidToken
                }),
        };
        async move { result }
    }
}
