//! Artist master record, keyed by `artist_name`.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::audit::AuditInfo;
use crate::pagination::SortColumn;
use crate::resource::{EntityKind, Resource, SortValue};
use crate::types::{DbId, UNASSIGNED_ID};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub artist_name: String,
    pub unit_name: Option<String>,
    /// The content (game, album, event) the artist appears in.
    pub content: Option<String>,
    #[serde(skip_serializing)]
    pub deleted: bool,
    #[serde(rename = "audit_info")]
    pub audit: AuditInfo,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArtist {
    #[validate(length(min = 1, max = 50, message = "artist_name must be 1 to 50 characters"))]
    pub artist_name: String,
    #[validate(length(max = 25, message = "unit_name must be at most 25 characters"))]
    pub unit_name: Option<String>,
    #[validate(length(max = 20, message = "content must be at most 20 characters"))]
    pub content: Option<String>,
}

/// Partial update. An absent (or `null`) field is left untouched; an empty
/// string is a value and is written.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateArtist {
    #[validate(length(min = 1, max = 50, message = "artist_name must be 1 to 50 characters"))]
    pub artist_name: Option<String>,
    #[validate(length(max = 25, message = "unit_name must be at most 25 characters"))]
    pub unit_name: Option<String>,
    #[validate(length(max = 20, message = "content must be at most 20 characters"))]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistKey(pub String);

impl fmt::Display for ArtistKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Resource for Artist {
    const KIND: EntityKind = EntityKind::Artist;
    const KEY_FIELDS: &'static [&'static str] = &["artist_name"];
    const SORTABLE: &'static [SortColumn] = &[
        SortColumn::new("id", "id"),
        SortColumn::new("artist_name", "artist_name"),
        SortColumn::new("unit_name", "unit_name"),
        SortColumn::new("content", "content"),
        SortColumn::new("created_at", "created_at"),
        SortColumn::new("updated_at", "updated_at"),
    ];

    type Key = ArtistKey;
    type Create = CreateArtist;
    type Patch = UpdateArtist;

    fn build(input: CreateArtist, audit: AuditInfo) -> Self {
        Self {
            id: UNASSIGNED_ID,
            artist_name: input.artist_name,
            unit_name: input.unit_name,
            content: input.content,
            deleted: false,
            audit,
        }
    }

    fn apply(&mut self, patch: UpdateArtist) {
        if let Some(artist_name) = patch.artist_name {
            self.artist_name = artist_name;
        }
        if let Some(unit_name) = patch.unit_name {
            self.unit_name = Some(unit_name);
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
    }

    fn id(&self) -> DbId {
        self.id
    }

    fn key(&self) -> ArtistKey {
        ArtistKey(self.artist_name.clone())
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

    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "artist_name" => SortValue::Text(Some(self.artist_name.clone())),
            "unit_name" => SortValue::Text(self.unit_name.clone()),
            "content" => SortValue::Text(self.content.clone()),
            "created_at" => SortValue::Time(self.audit.created_at),
            "updated_at" => SortValue::Time(self.audit.updated_at),
            _ => SortValue::Int(self.id),
        }
    }
}
