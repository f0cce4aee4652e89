use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use yamdb_domain::pagination::Page;
use yamdb_domain::policy::{Access, Target};
use yamdb_domain::user::UserRole;

use super::{Caller, ListQuery, require};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase,
    UpdateUserInput, UpdateUserUseCase,
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            bio: user.bio,
            role: user.role,
        }
    }
}

/// Body of both `PATCH /users/{username}/` and `PATCH /users/me/`.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            bio: body.bio,
            role: body.role,
        }
    }
}

// ── GET /users/ ──────────────────────────────────────────────────────────────

pub async fn list_users(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<UserResponse>>, ApiError> {
    require(&requester, Access::Read, Target::UserDirectory)?;
    let page = query.page();
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(query.search, page).await?;
    Ok(Json(users.map(UserResponse::from)))
}

// ── POST /users/ ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
}

pub async fn create_user(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require(&requester, Access::Write, Target::UserDirectory)?;
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            username: body.username,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            bio: body.bio,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── /users/{username}/ ───────────────────────────────────────────────────────

pub async fn get_user(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&requester, Access::Read, Target::UserDirectory)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.by_username(&username).await?;
    Ok(Json(user.into()))
}

pub async fn update_user(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&requester, Access::Write, Target::UserDirectory)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&username, body.into()).await?;
    Ok(Json(user.into()))
}

pub async fn delete_user(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&requester, Access::Write, Target::UserDirectory)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── /users/me/ ───────────────────────────────────────────────────────────────

pub async fn get_me(
    Caller(requester): Caller,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&requester, Access::Read, Target::OwnProfile)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.by_id(requester.user_id).await?;
    Ok(Json(user.into()))
}

pub async fn update_me(
    Caller(requester): Caller,
    State(state): State<AppState>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&requester, Access::Write, Target::OwnProfile)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute_own(requester.user_id, body.into()).await?;
    Ok(Json(user.into()))
}
