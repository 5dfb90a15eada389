//! Capability descriptor the lifecycle engine is generic over.
//!
//! Each managed entity type implements [`Resource`] once: how to build it
//! from a create request, how to merge a patch, what its natural key is,
//! and which other records it references. The engine never matches on
//! concrete entity types.

use std::fmt::{Debug, Display};

use crate::audit::AuditInfo;
use crate::pagination::SortColumn;
use crate::types::{DbId, Timestamp};

/// Tag for every managed entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    User,
    Track,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Artist => "Artist",
            EntityKind::User => "User",
            EntityKind::Track => "Track",
        }
    }
}

/// A pointer from one record to another that must be live when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub kind: EntityKind,
    pub id: DbId,
}

/// Value a record exposes for in-memory ordering by a [`SortColumn`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Int(i64),
    Bool(bool),
    Text(Option<String>),
    Time(Timestamp),
}

pub trait Resource: Clone + Debug + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Client-facing names of the fields forming the natural key.
    const KEY_FIELDS: &'static [&'static str];

    /// Fields a listing may be sorted by. Must include `id`.
    const SORTABLE: &'static [SortColumn];

    /// Natural key, unique among live records of this type.
    type Key: Clone + Debug + Display + PartialEq + Send + Sync;

    /// Fully populated, shape-validated create request.
    type Create: Send;

    /// Partial update; absent fields leave the record untouched.
    type Patch: Send;

    /// Build an unsaved record carrying [`crate::types::UNASSIGNED_ID`].
    fn build(input: Self::Create, audit: AuditInfo) -> Self;

    /// Merge every present field of `patch` into `self`.
    fn apply(&mut self, patch: Self::Patch);

    fn id(&self) -> DbId;

    fn key(&self) -> Self::Key;

    fn is_deleted(&self) -> bool;

    /// Set the liveness flag. There is no inverse.
    fn mark_deleted(&mut self);

    fn audit(&self) -> &AuditInfo;

    fn audit_mut(&mut self) -> &mut AuditInfo;

    /// Records that must exist and be live for this one to be written.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Ordering value for `column`, one of [`Resource::SORTABLE`].
    fn sort_value(&self, column: &str) -> SortValue;
}
