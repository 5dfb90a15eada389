//! Row model for the `tracks` table.

use prsk_core::audit::AuditInfo;
use prsk_core::catalog::{MusicType, Track, UnknownMusicType};
use prsk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TrackRow {
    pub id: DbId,
    pub title: String,
    /// One of the `MusicType` names; the column carries a CHECK constraint.
    pub music_type: String,
    pub artist_id: DbId,
    pub specially: Option<bool>,
    pub lyrics_name: Option<String>,
    pub music_name: Option<String>,
    pub featuring: Option<String>,
    pub youtube_link: Option<String>,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

impl TryFrom<TrackRow> for Track {
    type Error = UnknownMusicType;

    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        Ok(Track {
            id: row.id,
            title: row.title,
            music_type: row.music_type.parse::<MusicType>()?,
            artist_id: row.artist_id,
            specially: row.specially,
            lyrics_name: row.lyrics_name,
            music_name: row.music_name,
            featuring: row.featuring,
            youtube_link: row.youtube_link,
            deleted: row.deleted,
            audit: AuditInfo {
                created_at: row.created_at,
                created_by: row.created_by,
                updated_at: row.updated_at,
                updated_by: row.updated_by,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn row(music_type: &str) -> TrackRow {
        let now = Utc::now();
        TrackRow {
            id: 7,
            title: "Tell Your World".to_string(),
            music_type: music_type.to_string(),
            artist_id: 1,
            specially: None,
            lyrics_name: None,
            music_name: None,
            featuring: None,
            youtube_link: None,
            deleted: false,
            created_at: now,
            created_by: "system".to_string(),
            updated_at: now,
            updated_by: "system".to_string(),
        }
    }

    #[test]
    fn row_converts_to_track() {
        let track = Track::try_from(row("sekai_version")).unwrap();
        assert_eq!(track.music_type, MusicType::SekaiVersion);
        assert_eq!(track.audit.created_by, "system");
    }

    #[test]
    fn unknown_music_type_fails_conversion() {
        assert_matches!(Track::try_from(row("remix")), Err(UnknownMusicType(_)));
    }
}
