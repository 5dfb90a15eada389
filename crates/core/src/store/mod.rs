//! Entity Store interface.
//!
//! A [`Store`] hands out transactions. Every read that decides a write, and
//! the write itself, go through the same transaction, which is committed
//! only when the whole operation has succeeded. Dropping a transaction
//! without committing discards it.
//!
//! Reads exclude soft-deleted rows unless [`Visibility::IncludeDeleted`] is
//! passed explicitly.

pub mod memory;

use async_trait::async_trait;

use crate::pagination::PageRequest;
use crate::resource::Resource;
use crate::types::DbId;

pub use memory::{MemoryStore, MemoryTx};

/// Errors raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A storage-level uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Connectivity, decoding, or any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// Whether a read may return soft-deleted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Live,
    IncludeDeleted,
}

/// Row lock taken when a live record is loaded to decide a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLock {
    /// The record itself is about to be rewritten.
    Update,
    /// The record is a parent that must stay live until commit.
    Share,
}

#[async_trait]
pub trait Store: Send + Sync {
    type Tx: Transaction;

    async fn begin(&self) -> Result<Self::Tx, StoreError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait Transaction: Send + Sized {
    async fn commit(self) -> Result<(), StoreError>;
}

/// Keyed storage for one entity type, scoped to a transaction.
#[async_trait]
pub trait Table<R: Resource>: Send {
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<R>, StoreError>;

    /// Load a live record and hold `lock` on it until the transaction ends.
    ///
    /// Stores that serialize whole transactions need not lock anything.
    async fn lock_live(&mut self, id: DbId, _lock: RowLock) -> Result<Option<R>, StoreError> {
        <Self as Table<R>>::find_by_id(self, id, Visibility::Live).await
    }

    async fn find_live_by_key(&mut self, key: &R::Key) -> Result<Option<R>, StoreError>;

    /// Persist a new record, returning it with its assigned id.
    async fn insert(&mut self, record: &R) -> Result<R, StoreError>;

    /// Overwrite an existing record, returning the stored row.
    async fn update(&mut self, record: &R) -> Result<R, StoreError>;

    /// One page of live records plus the total live count.
    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<R>, i64), StoreError>;
}
