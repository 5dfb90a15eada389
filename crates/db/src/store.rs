//! PostgreSQL-backed entity store.

use async_trait::async_trait;
use prsk_core::pagination::{PageRequest, SortDirection};
use prsk_core::store::{RowLock, Store, StoreError, Transaction, Visibility};
use prsk_core::types::DbId;
use sqlx::{PgConnection, Postgres};

use crate::DbPool;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    type Tx = PgTx;

    async fn begin(&self) -> Result<PgTx, StoreError> {
        let tx = self.pool.begin().await.map_err(classify)?;
        Ok(PgTx(tx))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await.map_err(classify)
    }
}

/// One request's database transaction. Rolled back on drop unless committed.
pub struct PgTx(sqlx::Transaction<'static, Postgres>);

impl PgTx {
    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        &mut *self.0
    }
}

#[async_trait]
impl Transaction for PgTx {
    async fn commit(self) -> Result<(), StoreError> {
        self.0.commit().await.map_err(classify)
    }
}

/// Map a driver error onto the store's error kinds.
///
/// Unique violations keep the constraint name so the caller can tell which
/// natural key was hit; everything else is an opaque backend failure.
pub fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            tracing::debug!(%constraint, "Postgres reported a unique violation");
            return StoreError::UniqueViolation { constraint };
        }
    }
    StoreError::backend(err)
}

/// An update matched no row although the record was loaded in the same
/// transaction.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} has no row to update")]
pub struct MissingRow {
    pub entity: &'static str,
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// SQL fragments shared by the repositories
// ---------------------------------------------------------------------------

/// Extra `WHERE` condition restricting a read to live rows.
pub(crate) fn liveness(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Live => " AND deleted = false",
        Visibility::IncludeDeleted => "",
    }
}

pub(crate) fn lock_clause(lock: RowLock) -> &'static str {
    match lock {
        RowLock::Update => " FOR UPDATE",
        RowLock::Share => " FOR SHARE",
    }
}

/// `ORDER BY` for a listing. The column comes from the resource's declared
/// sortable columns, never from client input.
pub(crate) fn order_by(page: &PageRequest) -> String {
    let nulls = match page.direction {
        SortDirection::Asc => "NULLS FIRST",
        SortDirection::Desc => "NULLS LAST",
    };
    format!(
        "ORDER BY {} {} {nulls}, id ASC",
        page.sort.column,
        page.direction.as_sql()
    )
}
