//! Uniqueness Guard: natural keys are unique among live records.

use crate::error::CoreError;
use crate::resource::Resource;
use crate::store::Table;
use crate::types::DbId;

/// Does `existing` (the live holder of a key, if any) block a write by `exclude_id`?
pub fn collides(existing_id: Option<DbId>, exclude_id: Option<DbId>) -> bool {
    match (existing_id, exclude_id) {
        (None, _) => false,
        (Some(found), Some(own)) => found != own,
        (Some(_), None) => true,
    }
}

/// The conflict reported for `key` on resource `R`.
pub fn duplicate<R: Resource>(key: &R::Key) -> CoreError {
    CoreError::DuplicateKey {
        entity: R::KIND.name(),
        fields: R::KEY_FIELDS,
        value: key.to_string(),
    }
}

/// Fail with [`CoreError::DuplicateKey`] if another live record holds `key`.
///
/// `exclude_id` is the record being updated, which never conflicts with itself.
pub async fn check_unique<R, T>(
    tx: &mut T,
    key: &R::Key,
    exclude_id: Option<DbId>,
) -> Result<(), CoreError>
where
    R: Resource,
    T: Table<R> + ?Sized,
{
    let existing = tx.find_live_by_key(key).await?;
    if collides(existing.as_ref().map(|r| r.id()), exclude_id) {
        tracing::debug!(entity = R::KIND.name(), key = %key, "Natural key already taken");
        return Err(duplicate::<R>(key));
    }
    Ok(())
}
