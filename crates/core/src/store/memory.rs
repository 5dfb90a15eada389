//! In-process [`Store`] used by tests and by the server when no database is
//! configured.
//!
//! A transaction takes the store's lock for its whole lifetime and works on
//! a private copy of the tables. Commit writes the copy back; dropping the
//! transaction discards it. Transactions are therefore fully serialized.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Store, StoreError, Table, Transaction, Visibility};
use crate::catalog::{Artist, Track, User};
use crate::pagination::{PageRequest, SortDirection};
use crate::resource::Resource;
use crate::types::DbId;

/// Rows of one entity type plus its id sequence.
#[derive(Debug, Clone)]
pub struct Rows<R> {
    next_id: DbId,
    rows: BTreeMap<DbId, R>,
}

impl<R> Default for Rows<R> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTables {
    artists: Rows<Artist>,
    users: Rows<User>,
    tracks: Rows<Track>,
}

/// An entity type with a table in [`MemoryTables`], and the id setter the
/// store needs on insert.
pub trait MemoryResident: Resource {
    fn rows(tables: &MemoryTables) -> &Rows<Self>;
    fn rows_mut(tables: &mut MemoryTables) -> &mut Rows<Self>;
    fn with_id(self, id: DbId) -> Self;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> Result<MemoryTx, StoreError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTx { guard, working })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryTables>,
    working: MemoryTables,
}

#[async_trait]
impl Transaction for MemoryTx {
    async fn commit(self) -> Result<(), StoreError> {
        let MemoryTx { mut guard, working } = self;
        *guard = working;
        Ok(())
    }
}

impl MemoryTx {
    /// Reject `record` if another live row already holds its key.
    fn ensure_key_free<R: MemoryResident>(&self, record: &R) -> Result<(), StoreError> {
        if record.is_deleted() {
            return Ok(());
        }
        let key = record.key();
        let taken = R::rows(&self.working)
            .rows
            .values()
            .any(|r| !r.is_deleted() && r.id() != record.id() && r.key() == key);
        if taken {
            return Err(StoreError::UniqueViolation {
                constraint: format!("uq_{}_natural_key", R::KIND.name().to_lowercase()),
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} does not exist")]
struct MissingRow {
    entity: &'static str,
    id: DbId,
}

#[async_trait]
impl<R: MemoryResident> Table<R> for MemoryTx {
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<R>, StoreError> {
        let found = R::rows(&self.working).rows.get(&id);
        Ok(found
            .filter(|r| visibility == Visibility::IncludeDeleted || !r.is_deleted())
            .cloned())
    }

    async fn find_live_by_key(&mut self, key: &R::Key) -> Result<Option<R>, StoreError> {
        Ok(R::rows(&self.working)
            .rows
            .values()
            .find(|r| !r.is_deleted() && &r.key() == key)
            .cloned())
    }

    async fn insert(&mut self, record: &R) -> Result<R, StoreError> {
        self.ensure_key_free(record)?;
        let table = R::rows_mut(&mut self.working);
        let id = table.next_id;
        table.next_id += 1;
        let stored = record.clone().with_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&mut self, record: &R) -> Result<R, StoreError> {
        self.ensure_key_free(record)?;
        let table = R::rows_mut(&mut self.working);
        match table.rows.get_mut(&record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(record.clone())
            }
            None => Err(StoreError::backend(MissingRow {
                entity: R::KIND.name(),
                id: record.id(),
            })),
        }
    }

    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<R>, i64), StoreError> {
        let mut live: Vec<&R> = R::rows(&self.working)
            .rows
            .values()
            .filter(|r| !r.is_deleted())
            .collect();

        let field = page.sort.field;
        live.sort_by(|a, b| {
            let by_value = a.sort_value(field).cmp(&b.sort_value(field));
            let by_value = match page.direction {
                SortDirection::Asc => by_value,
                SortDirection::Desc => by_value.reverse(),
            };
            by_value.then_with(|| a.id().cmp(&b.id()))
        });

        let total = live.len() as i64;
        let items = live
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok((items, total))
    }
}

impl MemoryResident for Artist {
    fn rows(tables: &MemoryTables) -> &Rows<Self> {
        &tables.artists
    }

    fn rows_mut(tables: &mut MemoryTables) -> &mut Rows<Self> {
        &mut tables.artists
    }

    fn with_id(mut self, id: DbId) -> Self {
        self.id = id;
        self
    }
}

impl MemoryResident for User {
    fn rows(tables: &MemoryTables) -> &Rows<Self> {
        &tables.users
    }

    fn rows_mut(tables: &mut MemoryTables) -> &mut Rows<Self> {
        &mut tables.users
    }

    fn with_id(mut self, id: DbId) -> Self {
        self.id = id;
        self
    }
}

impl MemoryResident for Track {
    fn rows(tables: &MemoryTables) -> &Rows<Self> {
        &tables.tracks
    }

    fn rows_mut(tables: &mut MemoryTables) -> &mut Rows<Self> {
        &mut tables.tracks
    }

    fn with_id(mut self, id: DbId) -> Self {
        self.id = id;
        self
    }
}
