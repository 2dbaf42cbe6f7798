use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{error::ApiError, state::AppState};
use pronuncia_services::auth::{hash_password, issue_token, verify_password};
use pronuncia_services::dao::base::DaoError;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub points: i64,
    pub level: i32,
}

fn auth_response(state: &AppState, user: pronuncia_db::models::User) -> Result<AuthResponse, ApiError> {
    let id = user
        .id
        .ok_or_else(|| ApiError::Internal("User missing id".to_string()))?
        .to_hex();
    let token = issue_token(&state.auth, &id, &user.username)?;
    Ok(AuthResponse {
        token,
        user: UserResponse {
            id,
            username: user.username,
            points: user.points,
            level: user.level,
        },
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    body.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let password_hash = hash_password(&body.password)?;
    let user = state
        .users
        .create(body.username.trim().to_string(), password_hash)
        .await
        .map_err(|e| match e {
            DaoError::DuplicateKey(_) => {
                ApiError::Conflict("Username already taken".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(auth_response(&state, user)?))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .find_by_username(body.username.trim())
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    verify_password(&body.password, &user.password_hash)?;

    Ok(Json(auth_response(&state, user)?))
}
