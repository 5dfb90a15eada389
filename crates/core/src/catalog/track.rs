//! Track (music entry) master record.
//!
//! A track is keyed by the pair (`title`, `music_type`) and must point at a
//! live artist whenever it is written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::AuditInfo;
use crate::pagination::SortColumn;
use crate::resource::{EntityKind, Reference, Resource, SortValue};
use crate::types::{DbId, UNASSIGNED_ID};

// ---------------------------------------------------------------------------
// MusicType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicType {
    Original,
    Cover,
    SekaiVersion,
    Collaboration,
}

impl MusicType {
    pub const ALL: [MusicType; 4] = [
        MusicType::Original,
        MusicType::Cover,
        MusicType::SekaiVersion,
        MusicType::Collaboration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MusicType::Original => "original",
            MusicType::Cover => "cover",
            MusicType::SekaiVersion => "sekai_version",
            MusicType::Collaboration => "collaboration",
        }
    }
}

impl fmt::Display for MusicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown music type: {0}")]
pub struct UnknownMusicType(pub String);

impl FromStr for MusicType {
    type Err = UnknownMusicType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MusicType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownMusicType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Track
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    pub id: DbId,
    pub title: String,
    pub music_type: MusicType,
    pub artist_id: DbId,
    pub specially: Option<bool>,
    pub lyrics_name: Option<String>,
    pub music_name: Option<String>,
    pub featuring: Option<String>,
    pub youtube_link: Option<String>,
    #[serde(skip_serializing)]
    pub deleted: bool,
    #[serde(rename = "audit_info")]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrack {
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: String,
    pub music_type: MusicType,
    #[validate(range(min = 1, message = "artist_id must be a positive id"))]
    pub artist_id: DbId,
    pub specially: Option<bool>,
    #[validate(length(max = 50, message = "lyrics_name must be at most 50 characters"))]
    pub lyrics_name: Option<String>,
    #[validate(length(max = 50, message = "music_name must be at most 50 characters"))]
    pub music_name: Option<String>,
    #[validate(length(max = 50, message = "featuring must be at most 50 characters"))]
    pub featuring: Option<String>,
    #[validate(length(max = 255, message = "youtube_link must be at most 255 characters"))]
    pub youtube_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrack {
    #[validate(length(min = 1, max = 100, message = "title must be 1 to 100 characters"))]
    pub title: Option<String>,
    pub music_type: Option<MusicType>,
    #[validate(range(min = 1, message = "artist_id must be a positive id"))]
    pub artist_id: Option<DbId>,
    pub specially: Option<bool>,
    #[validate(length(max = 50, message = "lyrics_name must be at most 50 characters"))]
    pub lyrics_name: Option<String>,
    #[validate(length(max = 50, message = "music_name must be at most 50 characters"))]
    pub music_name: Option<String>,
    #[validate(length(max = 50, message = "featuring must be at most 50 characters"))]
    pub featuring: Option<String>,
    #[validate(length(max = 255, message = "youtube_link must be at most 255 characters"))]
    pub youtube_link: Option<String>,
}

/// Composite natural key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackKey {
    pub title: String,
    pub music_type: MusicType,
}

impl fmt::Display for TrackKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.title, self.music_type)
    }
}

impl Resource for Track {
    const KIND: EntityKind = EntityKind::Track;
    const KEY_FIELDS: &'static [&'static str] = &["title", "music_type"];
    const SORTABLE: &'static [SortColumn] = &[
        SortColumn::new("id", "id"),
        SortColumn::new("title", "title"),
        SortColumn::new("music_type", "music_type"),
        SortColumn::new("artist_id", "artist_id"),
        SortColumn::new("created_at", "created_at"),
        SortColumn::new("updated_at", "updated_at"),
    ];

    type Key = TrackKey;
    type Create = CreateTrack;
    type Patch = UpdateTrack;

    fn build(input: CreateTrack, audit: AuditInfo) -> Self {
        Self {
            id: UNASSIGNED_ID,
            title: input.title,
            music_type: input.music_type,
            artist_id: input.artist_id,
            specially: input.specially,
            lyrics_name: input.lyrics_name,
            music_name: input.music_name,
            featuring: input.featuring,
            youtube_link: input.youtube_link,
            deleted: false,
            audit,
        }
    }

    fn apply(&mut self, patch: UpdateTrack) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(music_type) = patch.music_type {
            self.music_type = music_type;
        }
        if let Some(artist_id) = patch.artist_id {
            self.artist_id = artist_id;
        }
        if patch.specially.is_some() {
            self.specially = patch.specially;
        }
        if patch.lyrics_name.is_some() {
            self.lyrics_name = patch.lyrics_name;
        }
        if patch.music_name.is_some() {
            self.music_name = patch.music_name;
        }
        if patch.featuring.is_some() {
            self.featuring = patch.featuring;
        }
        if patch.youtube_link.is_some() {
            self.youtube_link = patch.youtube_link;
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn key(&self) -> TrackKey {
        TrackKey {
            title: self.title.clone(),
            music_type: self.music_type,
        }
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference {
            kind: EntityKind::Artist,
            id: self.artist_id,
        }]
    }

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "title" => SortValue::Text(Some(self.title.clone())),
            "music_type" => SortValue::Text(Some(self.music_type.as_str().to_string())),
            "artist_id" => SortValue::Int(self.artist_id),
            "created_at" => SortValue::Time(self.audit.created_at),
            "updated_at" => SortValue::Time(self.audit.updated_at),
            _ => SortValue::Int(self.id),
        }
    }
}
