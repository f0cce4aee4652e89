pub mod auth;
pub mod catalog;
pub mod comment;
pub mod review;
pub mod title;
pub mod user;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Deserializer};

use yamdb_auth_types::identity::Identity;
use yamdb_domain::pagination::PageRequest;
use yamdb_domain::policy::{Access, Requester, Target, authorize};

use crate::domain::repository::UserRepository;
use crate::error::ApiError;
use crate::state::AppState;

/// `?search=&limit=&offset=` for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ListQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }
}

/// Authenticated caller as currently stored.
///
/// The bearer token only names the account. The role comes from the user
/// row on every request, so a demotion or deletion takes effect at once.
/// A token whose account no longer exists is rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Requester);

impl FromRequestParts<AppState> for Caller {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let user = state
            .user_repo()
            .find_by_id(identity.user_id)
            .await
            .map_err(IntoResponse::into_response)?;
        match user {
            Some(user) => Ok(Self(Requester {
                user_id: user.id,
                role: user.role,
            })),
            None => {
                tracing::debug!(user_id = %identity.user_id, "token for missing account");
                Err(ApiError::AccountGone.into_response())
            }
        }
    }
}

/// Apply the access policy to an authenticated caller.
pub fn require(requester: &Requester, access: Access, target: Target) -> Result<(), ApiError> {
    authorize(Some(requester), access, target)?;
    Ok(())
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`).
/// Pair with `#[serde(default)]`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
