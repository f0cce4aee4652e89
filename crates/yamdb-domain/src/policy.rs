//! Access-control policy: a pure decision over (requester, access, target).

use uuid::Uuid;

use crate::user::UserRole;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Whether the request only reads or also changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    /// GET, HEAD and OPTIONS are reads; every other method writes.
    pub fn from_method(method: &str) -> Self {
        match method {
            "GET" | "HEAD" | "OPTIONS" => Self::Read,
            _ => Self::Write,
        }
    }
}

/// What the request acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Categories, genres and titles.
    Catalog,
    /// Review or comment collections (posting a new one).
    Contribution,
    /// An existing review or comment written by `author_id`.
    OwnedBy(Uuid),
    /// User management endpoints.
    UserDirectory,
    /// The requester's own profile.
    OwnProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("authentication required")]
    Unauthenticated,
    #[error("permission denied")]
    Forbidden,
}

pub fn authorize(
    requester: Option<&Requester>,
    access: Access,
    target: Target,
) -> Result<(), Denial> {
    let public_read = matches!(
        target,
        Target::Catalog | Target::Contribution | Target::OwnedBy(_)
    );
    if access == Access::Read && public_read {
        return Ok(());
    }

    let requester = requester.ok_or(Denial::Unauthenticated)?;
    let allowed = match target {
        Target::Catalog | Target::UserDirectory => requester.role.is_admin(),
        Target::Contribution | Target::OwnProfile => true,
        Target::OwnedBy(author_id) => {
            requester.user_id == author_id || requester.role.can_moderate()
        }
    };
    if allowed { Ok(()) } else { Err(Denial::Forbidden) }
}
