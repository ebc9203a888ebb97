//! Registration and login routes

use super::extract::JsonBody;
use super::MessageResponse;
use crate::error::Result;
use crate::models::UserProfile;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let users = state.users.clone();

    // bcrypt is deliberately slow; keep it off the async workers
    tokio::task::spawn_blocking(move || {
        users.register(
            payload.name.as_deref().unwrap_or_default(),
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
    })
    .await??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let users = state.users.clone();

    let user = tokio::task::spawn_blocking(move || {
        users.authenticate(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
    })
    .await??;

    let token = state.tokens.issue(&user)?;

    Ok(Json(LoginResponse {
        token,
        user: user.profile(),
    }))
}
