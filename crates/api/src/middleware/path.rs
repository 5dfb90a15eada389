//! Record id path extractor.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use prsk_core::types::DbId;

use crate::error::AppError;

/// The `{id}` path segment, rejected with 400 unless it is a positive integer.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        parse_id(&raw).map(EntityId)
    }
}

/// Parse a record id; ids start at 1.
pub fn parse_id(raw: &str) -> Result<DbId, AppError> {
    match raw.parse::<DbId>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::BadRequest(format!(
            "Invalid id '{raw}': must be a positive integer"
        ))),
    }
}
