//! Referential Validator: a dependent record may only point at live parents.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::resource::{Reference, Resource};
use crate::store::{RowLock, Table};
use crate::types::DbId;

/// Resolve a [`Reference`] of any kind inside the current transaction.
///
/// Implemented for every transaction that can read all referenced tables
/// (see [`crate::catalog`]).
#[async_trait]
pub trait ResolveReference: Send {
    async fn resolve_reference(&mut self, reference: Reference) -> Result<(), CoreError>;
}

/// Load the live parent `P` with id `id`, share-locked until commit.
///
/// Fails with [`CoreError::ReferenceNotFound`] if it is absent or soft-deleted.
pub async fn resolve_live<P, T>(tx: &mut T, id: DbId) -> Result<P, CoreError>
where
    P: Resource,
    T: Table<P> + ?Sized,
{
    match tx.lock_live(id, RowLock::Share).await? {
        Some(parent) => Ok(parent),
        None => {
            tracing::debug!(entity = P::KIND.name(), id, "Referenced record is not live");
            Err(CoreError::ReferenceNotFound {
                entity: P::KIND.name(),
                id,
            })
        }
    }
}
