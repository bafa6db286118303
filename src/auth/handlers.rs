use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tracing::{info, instrument, warn};

use crate::extract::Json;

use crate::auth::{
    dto::{CreateUserRequest, PublicUser, TokenRequest, TokenResponse, UpdateMeRequest},
    extractor::CurrentUser,
    password::{hash_password, is_valid_email, verify_password},
    repo::User,
    token,
};
use crate::error::ApiError;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/token", post(issue_token))
        .route("/me", get(get_me).patch(update_me))
}

fn public(user: User) -> PublicUser {
    PublicUser {
        id: user.id,
        email: user.email,
        name: user.name,
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .is_some()
    {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;
    // A concurrent signup for the same email loses here with a unique
    // violation, which maps to 409 like the pre-check above.
    let user = User::create(&state.db, &payload.email, &payload.name, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((StatusCode::CREATED, Json(public(user))))
}

#[instrument(skip(state, payload))]
pub async fn issue_token(
    State(state): State<AppState>,
    Json(mut payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password get the same answer so the endpoint
    // does not reveal which addresses are registered.
    let user = User::find_by_email(&state.db, &payload.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "token request for unknown email");
            ApiError::InvalidCredentials
        })?;

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = %user.id, "token request with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    // Replaces any previously issued token for this user.
    let value = token::generate();
    token::store(&state.db, user.id, &value)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %user.id, "token issued");
    Ok(Json(TokenResponse { token: value }))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Result<Json<PublicUser>, ApiError> {
    Ok(Json(public(user)))
}

#[instrument(skip(state, user, payload))]
pub async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UpdateMeRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let hash = match payload.password.as_deref() {
        Some(p) if p.len() < 8 => {
            return Err(ApiError::Validation("Password too short".into()));
        }
        Some(p) => Some(hash_password(p).map_err(ApiError::Internal)?),
        None => None,
    };

    let updated = User::update_profile(&state.db, user.id, payload.name.as_deref(), hash.as_deref())
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %updated.id, "profile updated");
    Ok(Json(public(updated)))
}
