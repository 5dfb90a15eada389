//! Handlers for the `/tracks` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use prsk_core::catalog::{CreateTrack, Track, UpdateTrack};
use prsk_core::pagination::Page;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::actor::RequestActor;
use crate::middleware::path::EntityId;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/v1/tracks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Track>>> {
    let request = params.page_request::<Track>()?;
    let page = state.lifecycle.list::<Track>(&request).await?;
    Ok(Json(page))
}

/// POST /api/v1/tracks
///
/// `artist_id` must name a live artist, otherwise 404 `REFERENCE_NOT_FOUND`.
pub async fn create(
    State(state): State<AppState>,
    RequestActor(ctx): RequestActor,
    Json(input): Json<CreateTrack>,
) -> AppResult<(StatusCode, Json<Track>)> {
    input.validate()?;
    let track = state.lifecycle.create::<Track>(input, &ctx).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// GET /api/v1/tracks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Track>> {
    let track = state.lifecycle.find_live::<Track>(id).await?;
    Ok(Json(track))
}

/// PUT /api/v1/tracks/{id}
///
/// Fields left out of the body keep their stored value. A changed
/// `artist_id` is resolved again; a changed title or music type re-checks
/// the composite key.
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
    Json(input): Json<UpdateTrack>,
) -> AppResult<Json<Track>> {
    input.validate()?;
    let track = state.lifecycle.update::<Track>(id, input, &ctx).await?;
    Ok(Json(track))
}

/// DELETE /api/v1/tracks/{id}
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
) -> AppResult<StatusCode> {
    state.lifecycle.soft_delete::<Track>(id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
