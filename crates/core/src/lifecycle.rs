//! Lifecycle Manager: create, partial update, soft delete, and live reads
//! for any [`Resource`], backed by any [`Store`].
//!
//! Each operation runs in one store transaction. All checks happen before
//! the single write, and the transaction is only committed once everything
//! has passed, so a rejected operation never leaves a partial write behind.

use crate::audit::{stamp_update, AuditInfo, MutationContext};
use crate::error::CoreError;
use crate::pagination::{Page, PageRequest};
use crate::references::ResolveReference;
use crate::resource::Resource;
use crate::store::{RowLock, Store, StoreError, Table, Transaction, Visibility};
use crate::types::DbId;
use crate::uniqueness::{check_unique, duplicate};

#[derive(Debug, Clone)]
pub struct Lifecycle<S> {
    store: S,
}

impl<S: Store> Lifecycle<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new record.
    ///
    /// Fails with [`CoreError::DuplicateKey`] if a live record already holds
    /// the natural key, or [`CoreError::ReferenceNotFound`] if a referenced
    /// parent is not live.
    pub async fn create<R>(&self, input: R::Create, ctx: &MutationContext) -> Result<R, CoreError>
    where
        R: Resource,
        S::Tx: Table<R> + ResolveReference,
    {
        let mut tx = self.store.begin().await?;

        let record = R::build(input, AuditInfo::created(ctx));
        let key = record.key();

        check_unique::<R, _>(&mut tx, &key, None).await?;
        for reference in record.references() {
            tx.resolve_reference(reference).await?;
        }

        let stored = <S::Tx as Table<R>>::insert(&mut tx, &record)
            .await
            .map_err(|e| persist_error::<R>(e, &key))?;
        tx.commit().await.map_err(|e| persist_error::<R>(e, &key))?;

        tracing::info!(
            entity = R::KIND.name(),
            id = stored.id(),
            actor = %ctx.actor,
            "Created record"
        );
        Ok(stored)
    }

    /// Merge `patch` into the live record `id`.
    ///
    /// The natural key is only re-checked when the patch changes it, and a
    /// reference is only re-resolved when the patch points it somewhere new.
    pub async fn update<R>(
        &self,
        id: DbId,
        patch: R::Patch,
        ctx: &MutationContext,
    ) -> Result<R, CoreError>
    where
        R: Resource,
        S::Tx: Table<R> + ResolveReference,
    {
        let mut tx = self.store.begin().await?;
        let current = load_for_write::<R, _>(&mut tx, id).await?;

        let mut working = current.clone();
        working.apply(patch);

        let key = working.key();
        if key != current.key() {
            check_unique::<R, _>(&mut tx, &key, Some(id)).await?;
        }

        let previous = current.references();
        for reference in working.references() {
            if !previous.contains(&reference) {
                tx.resolve_reference(reference).await?;
            }
        }

        stamp_update(working.audit_mut(), ctx);

        let stored = <S::Tx as Table<R>>::update(&mut tx, &working)
            .await
            .map_err(|e| persist_error::<R>(e, &key))?;
        tx.commit().await.map_err(|e| persist_error::<R>(e, &key))?;

        tracing::info!(
            entity = R::KIND.name(),
            id,
            actor = %ctx.actor,
            "Updated record"
        );
        Ok(stored)
    }

    /// Mark the live record `id` deleted. Terminal: a second call is `NotFound`.
    pub async fn soft_delete<R>(&self, id: DbId, ctx: &MutationContext) -> Result<(), CoreError>
    where
        R: Resource,
        S::Tx: Table<R>,
    {
        let mut tx = self.store.begin().await?;
        let mut record = load_for_write::<R, _>(&mut tx, id).await?;

        record.mark_deleted();
        stamp_update(record.audit_mut(), ctx);

        <S::Tx as Table<R>>::update(&mut tx, &record).await?;
        tx.commit().await?;

        tracing::info!(
            entity = R::KIND.name(),
            id,
            actor = %ctx.actor,
            "Soft-deleted record"
        );
        Ok(())
    }

    /// Fetch the live record `id`.
    pub async fn find_live<R>(&self, id: DbId) -> Result<R, CoreError>
    where
        R: Resource,
        S::Tx: Table<R>,
    {
        let mut tx = self.store.begin().await?;
        let record = <S::Tx as Table<R>>::find_by_id(&mut tx, id, Visibility::Live).await?;
        tx.commit().await?;
        record.ok_or(CoreError::NotFound {
            entity: R::KIND.name(),
            id,
        })
    }

    /// One page of live records.
    pub async fn list<R>(&self, request: &PageRequest) -> Result<Page<R>, CoreError>
    where
        R: Resource,
        S::Tx: Table<R>,
    {
        let mut tx = self.store.begin().await?;
        let (items, total) = <S::Tx as Table<R>>::list_live(&mut tx, request).await?;
        tx.commit().await?;
        Ok(Page::new(items, request, total))
    }
}

/// Load a live record for rewriting, or fail with `NotFound`.
async fn load_for_write<R, T>(tx: &mut T, id: DbId) -> Result<R, CoreError>
where
    R: Resource,
    T: Table<R>,
{
    tx.lock_live(id, RowLock::Update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: R::KIND.name(),
            id,
        })
}

/// A uniqueness violation caught by storage is the same failure as one caught
/// by the guard: a concurrent writer took the key between check and write.
fn persist_error<R: Resource>(err: StoreError, key: &R::Key) -> CoreError {
    match err {
        StoreError::UniqueViolation { constraint } => {
            tracing::debug!(
                entity = R::KIND.name(),
                %constraint,
                "Storage rejected duplicate natural key"
            );
            duplicate::<R>(key)
        }
        other => CoreError::Storage(other),
    }
}
