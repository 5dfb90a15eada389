//! Runtime choice between the PostgreSQL store and the in-memory store.

use async_trait::async_trait;
use prsk_core::pagination::PageRequest;
use prsk_core::resource::Resource;
use prsk_core::store::{
    MemoryStore, MemoryTx, RowLock, Store, StoreError, Table, Transaction, Visibility,
};
use prsk_core::types::DbId;

use crate::store::{PgStore, PgTx};

#[derive(Debug, Clone)]
pub enum Backend {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Backend {
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }
}

pub enum BackendTx {
    Postgres(PgTx),
    Memory(MemoryTx),
}

#[async_trait]
impl Store for Backend {
    type Tx = BackendTx;

    async fn begin(&self) -> Result<BackendTx, StoreError> {
        match self {
            Backend::Postgres(store) => store.begin().await.map(BackendTx::Postgres),
            Backend::Memory(store) => store.begin().await.map(BackendTx::Memory),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Backend::Postgres(store) => store.ping().await,
            Backend::Memory(store) => store.ping().await,
        }
    }
}

#[async_trait]
impl Transaction for BackendTx {
    async fn commit(self) -> Result<(), StoreError> {
        match self {
            BackendTx::Postgres(tx) => tx.commit().await,
            BackendTx::Memory(tx) => tx.commit().await,
        }
    }
}

#[async_trait]
impl<R> Table<R> for BackendTx
where
    R: Resource,
    PgTx: Table<R>,
    MemoryTx: Table<R>,
{
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<R>, StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::find_by_id(tx, id, visibility).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::find_by_id(tx, id, visibility).await,
        }
    }

    async fn lock_live(&mut self, id: DbId, lock: RowLock) -> Result<Option<R>, StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::lock_live(tx, id, lock).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::lock_live(tx, id, lock).await,
        }
    }

    async fn find_live_by_key(&mut self, key: &R::Key) -> Result<Option<R>, StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::find_live_by_key(tx, key).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::find_live_by_key(tx, key).await,
        }
    }

    async fn insert(&mut self, record: &R) -> Result<R, StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::insert(tx, record).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::insert(tx, record).await,
        }
    }

    async fn update(&mut self, record: &R) -> Result<R, StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::update(tx, record).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::update(tx, record).await,
        }
    }

    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<R>, i64), StoreError> {
        match self {
            BackendTx::Postgres(tx) => <PgTx as Table<R>>::list_live(tx, page).await,
            BackendTx::Memory(tx) => <MemoryTx as Table<R>>::list_live(tx, page).await,
        }
    }
}
