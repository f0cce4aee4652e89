use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::auth::{ConfirmInput, ConfirmUseCase, SignupInput, SignupUseCase};

// ── POST /auth/signup/ ───────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
}

/// Echoes the accepted payload once the confirmation code is queued.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<SignupRequest>, ApiError> {
    let usecase = SignupUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(SignupInput {
            username: body.username.clone(),
            email: body.email.clone(),
        })
        .await?;
    Ok(Json(body))
}

// ── POST /auth/token/ ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn obtain_token(
    State(state): State<AppState>,
    Json(body): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let usecase = ConfirmUseCase {
        repo: state.user_repo(),
        secret: state.jwt_secret.clone(),
    };
    let token = usecase
        .execute(ConfirmInput {
            username: body.username,
            confirmation_code: body.confirmation_code,
        })
        .await?;
    Ok(Json(TokenResponse { token }))
}
