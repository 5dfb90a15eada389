//! Handlers for the `/artists` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use prsk_core::catalog::{Artist, CreateArtist, UpdateArtist};
use prsk_core::pagination::Page;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::actor::RequestActor;
use crate::middleware::path::EntityId;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/v1/artists
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Artist>>> {
    let request = params.page_request::<Artist>()?;
    let page = state.lifecycle.list::<Artist>(&request).await?;
    Ok(Json(page))
}

/// POST /api/v1/artists
pub async fn create(
    State(state): State<AppState>,
    RequestActor(ctx): RequestActor,
    Json(input): Json<CreateArtist>,
) -> AppResult<(StatusCode, Json<Artist>)> {
    input.validate()?;
    let artist = state.lifecycle.create::<Artist>(input, &ctx).await?;
    Ok((StatusCode::CREATED, Json(artist)))
}

/// GET /api/v1/artists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<Artist>> {
    let artist = state.lifecycle.find_live::<Artist>(id).await?;
    Ok(Json(artist))
}

/// PUT /api/v1/artists/{id}
///
/// Fields left out of the body keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
    Json(input): Json<UpdateArtist>,
) -> AppResult<Json<Artist>> {
    input.validate()?;
    let artist = state.lifecycle.update::<Artist>(id, input, &ctx).await?;
    Ok(Json(artist))
}

/// DELETE /api/v1/artists/{id}
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
) -> AppResult<StatusCode> {
    state.lifecycle.soft_delete::<Artist>(id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
