//! Repository for the `tracks` table.

use async_trait::async_trait;
use prsk_core::catalog::{Track, TrackKey};
use prsk_core::pagination::PageRequest;
use prsk_core::store::{RowLock, StoreError, Table, Visibility};
use prsk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::TrackRow;
use crate::store::{classify, liveness, lock_clause, order_by, MissingRow, PgTx};

const COLUMNS: &str = "id, title, music_type, artist_id, specially, lyrics_name, music_name, \
     featuring, youtube_link, deleted, created_at, created_by, updated_at, updated_by";

pub struct TrackRepo;

impl TrackRepo {
    pub async fn create(conn: &mut PgConnection, track: &Track) -> Result<TrackRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks
                (title, music_type, artist_id, specially, lyrics_name, music_name, featuring,
                 youtube_link, deleted, created_at, created_by, updated_at, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(&track.title)
            .bind(track.music_type.as_str())
            .bind(track.artist_id)
            .bind(track.specially)
            .bind(&track.lyrics_name)
            .bind(&track.music_name)
            .bind(&track.featuring)
            .bind(&track.youtube_link)
            .bind(track.deleted)
            .bind(track.audit.created_at)
            .bind(&track.audit.created_by)
            .bind(track.audit.updated_at)
            .bind(&track.audit.updated_by)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<TrackRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE id = $1{}",
            liveness(visibility)
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn lock_live(
        conn: &mut PgConnection,
        id: DbId,
        lock: RowLock,
    ) -> Result<Option<TrackRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE id = $1{}{}",
            liveness(Visibility::Live),
            lock_clause(lock)
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find the live track holding the (`title`, `music_type`) pair.
    pub async fn find_live_by_title_and_type(
        conn: &mut PgConnection,
        key: &TrackKey,
    ) -> Result<Option<TrackRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE title = $1 AND music_type = $2{}",
            liveness(Visibility::Live)
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(&key.title)
            .bind(key.music_type.as_str())
            .fetch_optional(conn)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        track: &Track,
    ) -> Result<Option<TrackRow>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET
                title = $2,
                music_type = $3,
                artist_id = $4,
                specially = $5,
                lyrics_name = $6,
                music_name = $7,
                featuring = $8,
                youtube_link = $9,
                deleted = $10,
                updated_at = $11,
                updated_by = $12
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrackRow>(&query)
            .bind(track.id)
            .bind(&track.title)
            .bind(track.music_type.as_str())
            .bind(track.artist_id)
            .bind(track.specially)
            .bind(&track.lyrics_name)
            .bind(&track.music_name)
            .bind(&track.featuring)
            .bind(&track.youtube_link)
            .bind(track.deleted)
            .bind(track.audit.updated_at)
            .bind(&track.audit.updated_by)
            .fetch_optional(conn)
            .await
    }

    pub async fn list_live(
        conn: &mut PgConnection,
        page: &PageRequest,
    ) -> Result<(Vec<TrackRow>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks WHERE deleted = false")
            .fetch_one(&mut *conn)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM tracks WHERE deleted = false {} LIMIT $1 OFFSET $2",
            order_by(page)
        );
        let rows = sqlx::query_as::<_, TrackRow>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&mut *conn)
            .await?;
        Ok((rows, total))
    }
}

fn into_track(row: TrackRow) -> Result<Track, StoreError> {
    Track::try_from(row).map_err(StoreError::backend)
}

#[async_trait]
impl Table<Track> for PgTx {
    async fn find_by_id(
        &mut self,
        id: DbId,
        visibility: Visibility,
    ) -> Result<Option<Track>, StoreError> {
        TrackRepo::find_by_id(self.conn(), id, visibility)
            .await
            .map_err(classify)?
            .map(into_track)
            .transpose()
    }

    async fn lock_live(&mut self, id: DbId, lock: RowLock) -> Result<Option<Track>, StoreError> {
        TrackRepo::lock_live(self.conn(), id, lock)
            .await
            .map_err(classify)?
            .map(into_track)
            .transpose()
    }

    async fn find_live_by_key(&mut self, key: &TrackKey) -> Result<Option<Track>, StoreError> {
        TrackRepo::find_live_by_title_and_type(self.conn(), key)
            .await
            .map_err(classify)?
            .map(into_track)
            .transpose()
    }

    async fn insert(&mut self, record: &Track) -> Result<Track, StoreError> {
        let row = TrackRepo::create(self.conn(), record)
            .await
            .map_err(classify)?;
        into_track(row)
    }

    async fn update(&mut self, record: &Track) -> Result<Track, StoreError> {
        let row = TrackRepo::update(self.conn(), record)
            .await
            .map_err(classify)?
            .ok_or_else(|| {
                StoreError::backend(MissingRow {
                    entity: "Track",
                    id: record.id,
                })
            })?;
        into_track(row)
    }

    async fn list_live(&mut self, page: &PageRequest) -> Result<(Vec<Track>, i64), StoreError> {
        let (rows, total) = TrackRepo::list_live(self.conn(), page)
            .await
            .map_err(classify)?;
        let tracks = rows
            .into_iter()
            .map(into_track)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((tracks, total))
    }
}
