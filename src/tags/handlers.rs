use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::ownership::authorize;
use crate::state::AppState;

use super::dto::{AttrListQuery, AttrPayload, TagOut};
use super::repo::Tag;

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route(
            "/tags/:id",
            get(get_tag).patch(update_tag).delete(delete_tag),
        )
}

fn out(tag: Tag) -> TagOut {
    TagOut {
        id: tag.id,
        name: tag.name,
    }
}

#[instrument(skip(state, user))]
pub async fn list_tags(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(q): Query<AttrListQuery>,
) -> Result<Json<Vec<TagOut>>, ApiError> {
    let tags = Tag::list_by_user(&state.db, user.id, q.assigned_only != 0)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(tags.into_iter().map(out).collect()))
}

#[instrument(skip(state, user, payload))]
pub async fn create_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AttrPayload>,
) -> Result<(StatusCode, Json<TagOut>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Tag name must not be empty".into()));
    }

    let mut conn = state.db.acquire().await?;
    let tag = Tag::get_or_create(&mut conn, user.id, name)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %user.id, tag_id = %tag.id, "tag created");
    Ok((StatusCode::CREATED, Json(out(tag))))
}

#[instrument(skip(state, user))]
pub async fn get_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<TagOut>, ApiError> {
    let tag = authorize(Tag::get(&state.db, id).await.map_err(ApiError::Internal)?, user.id)?;
    Ok(Json(out(tag)))
}

#[instrument(skip(state, user, payload))]
pub async fn update_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttrPayload>,
) -> Result<Json<TagOut>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Tag name must not be empty".into()));
    }

    let tag = authorize(Tag::get(&state.db, id).await.map_err(ApiError::Internal)?, user.id)?;
    let updated = Tag::rename(&state.db, tag.id, name).await?;

    info!(user_id = %user.id, tag_id = %tag.id, "tag renamed");
    Ok(Json(out(updated)))
}

#[instrument(skip(state, user))]
pub async fn delete_tag(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let tag = authorize(Tag::get(&state.db, id).await.map_err(ApiError::Internal)?, user.id)?;
    Tag::delete(&state.db, tag.id)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %user.id, tag_id = %tag.id, "tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
