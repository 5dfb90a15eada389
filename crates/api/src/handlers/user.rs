//! Handlers for the `/users` resource.
//!
//! The stored password is never serialized into a response.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use prsk_core::catalog::{CreateUser, UpdateUser, User};
use prsk_core::pagination::Page;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::actor::RequestActor;
use crate::middleware::path::EntityId;
use crate::query::ListParams;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<User>>> {
    let request = params.page_request::<User>()?;
    let page = state.lifecycle.list::<User>(&request).await?;
    Ok(Json(page))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    RequestActor(ctx): RequestActor,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;
    let user = state.lifecycle.create::<User>(input, &ctx).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Json<User>> {
    let user = state.lifecycle.find_live::<User>(id).await?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    input.validate()?;
    let user = state.lifecycle.update::<User>(id, input, &ctx).await?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    RequestActor(ctx): RequestActor,
) -> AppResult<StatusCode> {
    state.lifecycle.soft_delete::<User>(id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}
