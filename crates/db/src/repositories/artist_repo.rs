//! Repository for the `artists` table.

use async_trait::async_trait;
use prsk_core::catalog::{Artist, ArtistKey};
use prsk_core::pagination::PageRequest;
use prsk_core::store::{RowLock, StoreError, Table, Visibility};
use prsk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::ArtistRow;
use crate::store::{classify, liveness, lock_clause, order_by, MissingRow, PgTx};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artist_name, unit_name, content, deleted, \
     created_at, created_by, updated_at, updated_by";

/// Row-level access to artists. Every method runs on the caller's connection
/// so it joins the caller's transaction.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert a new artist, returning the created row.
    pub async fn create(conn: &mut PgConnection, artist: &Artist) -> Result<ArtistRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists
                (artist_name, unit_name, content, deleted, created_at, created_by, updated_at, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(&artist.artist_name)
            .bind(&artist.unit_name)
            .bind(&artist.content)
            .bind(artist.deleted)
            .bind(artist.audit.created_at)
            .bind(&artist.audit.created_by)
            .bind(artist.audit.updated_at)
            .bind(&artist.audit.updated_by)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artists WHERE id = $1{}",
            liveness(visibility)
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a live artist and lock its row until the transaction ends.
    pub async fn lock_live(
        conn: &mut PgConnection,
        id: DbId,
        lock: RowLock,
    ) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artists WHERE id = $1{}{}",
            liveness(Visibility::Live),
            lock_clause(lock)
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find the live artist holding `artist_name` (case-sensitive).
    pub async fn find_live_by_name(
        conn: &mut PgConnection,
        artist_name: &str,
    ) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM artists WHERE artist_name = $1{}",
            liveness(Visibility::Live)
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(artist_name)
            .fetch_optional(conn)
            .await
    }

    /// Rewrite every mutable column. The created pair is never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        artist: &Artist,
    ) -> Result<Option<ArtistRow>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET
                artist_name = $2,
                unit_name = $3,
                content = $4,
                deleted = $5,
                updated_at = $6,
                updated_by = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtistRow>(&query)
            .bind(artist.id)
            .bind(&artist.artist_name)
            .bind(&artist.unit_name)
            .bind(&artist.content)
            .bind(artist.deleted)
            .bind(artist.audit.updated_at)
            .bind(&artist.audit.updated_by)
            .fetch_optional(conn)
            .await
    }

    /// One page of live artists plus the total live count.
    pub async fn list_live(
        conn: &mut PgConnection,
        page: &PageRequest,
    ) -> Result<(Vec<ArtistRow>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE deleted = false")
            .fetch_one(&mut *conn)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM artists WHERE deleted = false {} LIMIT $1 OFFSET $2",
            order_by(page)
        );
        let rows = sqlx::query_as::<_, ArtistRow>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await?;
        Ok((rows, total))
    }
}

#[async_trait]
impl Table<Artist> for PgTx {
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<Artist>, StoreError> {
        let row = ArtistRepo::find_by_id(self.conn(), id, visibility)
            .await
            .map_err(classify)?;
        Ok(row.map(Artist::from))
    }

    async fn lock_live(&mut self, id: DbId, lock: RowLock) -> Result<Option<Artist>, StoreError> {
        let row = ArtistRepo::lock_live(self.conn(), id, lock)
            .await
            .map_err(classify)?;
        Ok(row.map(Artist::from))
    }

    async fn find_live_by_key(&mut self, key: &ArtistKey) -> Result<Option<Artist>, StoreError> {
        let row = ArtistRepo::find_live_by_name(self.conn(), &key.0)
            .await
            .map_err(classify)?;
        Ok(row.map(Artist::from))
    }

    async fn insert(&mut self, record: &Artist) -> Result<Artist, StoreError> {
        let row = ArtistRepo::create(self.conn(), record)
            .await
            .map_err(classify)?;
        Ok(row.into())
    }

    async fn update(&mut self, record: &Artist) -> Result<Artist, StoreError> {
        ArtistRepo::update(self.conn(), record)
            .await
            .map_err(classify)?
            .map(Artist::from)
            .ok_or_else(|| {
                StoreError::backend(MissingRow {
                    entity: "Artist",
                    id: record.id,
                })
            })
    }

    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<Artist>, i64), StoreError> {
        let (rows, total) = ArtistRepo::list_live(self.conn(), page)
            .await
            .map_err(classify)?;
        Ok((rows.into_iter().map(Artist::from).collect(), total))
    }
}
