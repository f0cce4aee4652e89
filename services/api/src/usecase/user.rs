use uuid::Uuid;

use yamdb_domain::pagination::{Page, PageRequest};
use yamdb_domain::user::UserRole;
use yamdb_domain::validation::{self, FieldErrors};

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserChanges};
use crate::error::ApiError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        search: Option<String>,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        self.repo.list(search.as_deref(), page).await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let mut errors = FieldErrors::new();
        errors.check("username", validation::username(&input.username));
        errors.check("email", validation::email(&input.email));
        let profile = check_profile(
            &mut errors,
            input.first_name,
            input.last_name,
            input.bio,
            input.role.as_deref(),
        );
        errors.into_result()?;

        let mut user = User::new(input.username, input.email);
        user.first_name = profile.first_name.unwrap_or_default();
        user.last_name = profile.last_name.unwrap_or_default();
        user.bio = profile.bio.unwrap_or_default();
        user.role = profile.role.unwrap_or_default();
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn by_username(&self, username: &str) -> Result<User, ApiError> {
        self.repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)
    }

    pub async fn by_id(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    /// Admin update of any field, including role and email.
    pub async fn execute(&self, username: &str, input: UpdateUserInput) -> Result<User, ApiError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let changes = validate_changes(input)?;
        self.repo.update(user.id, &changes).await
    }

    /// Self-service update. Submitted `role` and `email` are ignored so the
    /// stored values are kept.
    pub async fn execute_own(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<User, ApiError> {
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        let input = UpdateUserInput {
            role: None,
            email: None,
            ..input
        };
        let changes = validate_changes(input)?;
        self.repo.update(user_id, &changes).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, username: &str) -> Result<(), ApiError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        self.repo.delete(user.id).await?;
        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }
}

struct Profile {
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    role: Option<UserRole>,
}

fn check_profile(
    errors: &mut FieldErrors,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    role: Option<&str>,
) -> Profile {
    if let Some(first_name) = &first_name {
        errors.check(
            "first_name",
            validation::max_len(first_name, validation::PERSON_NAME_MAX_LEN),
        );
    }
    if let Some(last_name) = &last_name {
        errors.check(
            "last_name",
            validation::max_len(last_name, validation::PERSON_NAME_MAX_LEN),
        );
    }
    if let Some(bio) = &bio {
        errors.check("bio", validation::max_len(bio, validation::BIO_MAX_LEN));
    }
    let role = role.and_then(|role| match validation::role(role) {
        Ok(role) => Some(role),
        Err(invalid) => {
            errors.add("role", invalid);
            None
        }
    });
    Profile {
        first_name,
        last_name,
        bio,
        role,
    }
}

fn validate_changes(input: UpdateUserInput) -> Result<UserChanges, ApiError> {
    let mut errors = FieldErrors::new();
    if let Some(username) = &input.username {
        errors.check("username", validation::username(username));
    }
    if let Some(email) = &input.email {
        errors.check("email", validation::email(email));
    }
    let profile = check_profile(
        &mut errors,
        input.first_name,
        input.last_name,
        input.bio,
        input.role.as_deref(),
    );
    errors.into_result()?;

    Ok(UserChanges {
        username: input.username,
        email: input.email,
        role: profile.role,
        bio: profile.bio,
        first_name: profile.first_name,
        last_name: profile.last_name,
    })
}
