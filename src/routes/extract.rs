use crate::auth::bearer_token;
use crate::error::SoilCheckError;
use crate::models::Claims;
use crate::server::AppState;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::header,
    http::request::Parts,
};

/// Caller identity taken from a verified bearer token.
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = SoilCheckError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(SoilCheckError::Unauthorized)?;

        state.tokens.verify(token).map(AuthUser)
    }
}

/// JSON request body. Rejections answer with the same `{"error": ...}` shape
/// as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(SoilCheckError))]
pub struct JsonBody<T>(pub T);
