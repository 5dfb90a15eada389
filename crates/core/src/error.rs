use crate::store::StoreError;
use crate::types::DbId;

/// Failures produced by the resource lifecycle engine.
///
/// Every variant is fail-fast: nothing is retried and no partial write
/// survives the request that produced it.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Update or delete targeted a record that is absent or already soft-deleted.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The natural key collides with another live record.
    #[error("Duplicate {entity} ({}): {value}", .fields.join(", "))]
    DuplicateKey {
        entity: &'static str,
        fields: &'static [&'static str],
        value: String,
    },

    /// A dependent record points at a parent that is absent or not live.
    #[error("Referenced {entity} with id {id} does not exist")]
    ReferenceNotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage failure not otherwise anticipated; fatal for the request.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
