use axum::{extract::State, http::StatusCode, routing::get, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};
use crate::ownership::authorize;
use crate::state::AppState;
use crate::tags::dto::{AttrListQuery, AttrPayload};

use super::dto::CareTipOut;
use super::repo::CareTip;

pub fn care_tip_routes() -> Router<AppState> {
    Router::new()
        .route("/care-tips", get(list_care_tips).post(create_care_tip))
        .route(
            "/care-tips/:id",
            get(get_care_tip)
                .patch(update_care_tip)
                .delete(delete_care_tip),
        )
}

fn out(tip: CareTip) -> CareTipOut {
    CareTipOut {
        id: tip.id,
        name: tip.name,
    }
}

#[instrument(skip(state, user))]
pub async fn list_care_tips(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(q): Query<AttrListQuery>,
) -> Result<Json<Vec<CareTipOut>>, ApiError> {
    let tips = CareTip::list_by_user(&state.db, user.id, q.assigned_only != 0)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(tips.into_iter().map(out).collect()))
}

#[instrument(skip(state, user, payload))]
pub async fn create_care_tip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AttrPayload>,
) -> Result<(StatusCode, Json<CareTipOut>), ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation(
            "Care tip name must not be empty".into(),
        ));
    }

    let mut conn = state.db.acquire().await?;
    let tip = CareTip::get_or_create(&mut conn, user.id, name)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %user.id, care_tip_id = %tip.id, "care tip created");
    Ok((StatusCode::CREATED, Json(out(tip))))
}

#[instrument(skip(state, user))]
pub async fn get_care_tip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CareTipOut>, ApiError> {
    let tip = authorize(
        CareTip::get(&state.db, id).await.map_err(ApiError::Internal)?,
        user.id,
    )?;
    Ok(Json(out(tip)))
}

#[instrument(skip(state, user, payload))]
pub async fn update_care_tip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttrPayload>,
) -> Result<Json<CareTipOut>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation(
            "Care tip name must not be empty".into(),
        ));
    }

    let tip = authorize(
        CareTip::get(&state.db, id).await.map_err(ApiError::Internal)?,
        user.id,
    )?;
    let updated = CareTip::rename(&state.db, tip.id, name).await?;

    info!(user_id = %user.id, care_tip_id = %tip.id, "care tip renamed");
    Ok(Json(out(updated)))
}

#[instrument(skip(state, user))]
pub async fn delete_care_tip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let tip = authorize(
        CareTip::get(&state.db, id).await.map_err(ApiError::Internal)?,
        user.id,
    )?;
    CareTip::delete(&state.db, tip.id)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = %user.id, care_tip_id = %tip.id, "care tip deleted");
    Ok(StatusCode::NO_CONTENT)
}
