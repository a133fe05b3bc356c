use std::sync::Arc;

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::token::verify_token;
use crate::server::AppState;

/// Extractor that requires a valid request token in the `Authorization`
/// header. The header carries the raw hex token, no scheme prefix.
pub struct RequireToken;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let detail = match self {
            AuthError::MissingToken => "Not authenticated",
            AuthError::InvalidToken => "Invalid token",
        };
        (StatusCode::FORBIDDEN, Json(json!({ "detail": detail }))).into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequireToken {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;

        // A header that is present but not valid UTF-8 is a supplied
        // credential, just a garbage one.
        let presented = header.to_str().map_err(|_| AuthError::InvalidToken)?;

        if !verify_token(&state.access_token, presented) {
            return Err(AuthError::InvalidToken);
        }

        Ok(RequireToken)
    }
}
