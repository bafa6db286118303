use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;

use crate::auth::{repo::User, token};
use crate::error::ApiError;
use crate::state::AppState;

/// Authentication gate. Runs before any protected handler, resolves the
/// bearer token to a full user row, and hands it over so downstream code
/// needs no further identity lookups.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingCredentials)?;

        let value = token::parse_header(header).ok_or(ApiError::MissingCredentials)?;

        let user = User::find_by_token(&state.db, value)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                warn!("unknown token presented");
                ApiError::InvalidToken
            })?;

        Ok(CurrentUser(user))
    }
}
