//! Audit actor extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use prsk_core::audit::{Actor, MutationContext};

use crate::error::AppError;
use crate::state::AppState;

/// Header naming who performs a mutation.
pub const ACTOR_HEADER: &str = "x-actor";

/// Longest actor name the audit columns hold.
pub const MAX_ACTOR_LEN: usize = 50;

/// Who is mutating and when, taken from the `X-Actor` header and the wall clock.
///
/// Use this as an extractor parameter in any mutating handler:
///
/// ```ignore
/// async fn create(State(state): State<AppState>, RequestActor(ctx): RequestActor) { ... }
/// ```
///
/// Falls back to the configured default actor when the header is missing or
/// blank. A header that is not visible ASCII, or longer than
/// [`MAX_ACTOR_LEN`], is rejected with 400.
#[derive(Debug, Clone)]
pub struct RequestActor(pub MutationContext);

impl FromRequestParts<AppState> for RequestActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(ACTOR_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                AppError::BadRequest("X-Actor header must be visible ASCII".into())
            })?),
            None => None,
        };

        let actor = resolve_actor(header, &state.config.default_actor)?;
        Ok(RequestActor(MutationContext::new(actor, Utc::now())))
    }
}

/// Pick the actor name from the header value, or the default when blank.
pub fn resolve_actor(header: Option<&str>, default_actor: &str) -> Result<Actor, AppError> {
    let name = header.map(str::trim).filter(|s| !s.is_empty());
    match name {
        Some(name) if name.chars().count() > MAX_ACTOR_LEN => Err(AppError::BadRequest(format!(
            "X-Actor header must be at most {MAX_ACTOR_LEN} characters"
        ))),
        Some(name) => Ok(Actor::new(name)),
        None => Ok(Actor::new(default_actor)),
    }
}
