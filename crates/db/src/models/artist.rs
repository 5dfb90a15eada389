//! Row model for the `artists` table.

use prsk_core::audit::AuditInfo;
use prsk_core::catalog::Artist;
use prsk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ArtistRow {
    pub id: DbId,
    pub artist_name: String,
    pub unit_name: Option<String>,
    pub content: Option<String>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Artist {
            id: row.id,
            artist_name: row.artist_name,
            unit_name: row.unit_name,
            content: row.content,
            deleted: row.deleted,
            audit: AuditInfo {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        }
    }
}
