//! Audit stamping for every mutation.
//!
//! The clock and the acting principal are always passed in by the caller,
//! never read from ambient state, so stamping is deterministic under test.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Identifier of whoever performed a mutation (a user name or `"system"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who is mutating, and when. Built once per request at the boundary.
#[derive(Debug, Clone)]
pub struct MutationContext {
    pub actor: Actor,
    pub now: Timestamp,
}

impl MutationContext {
    pub fn new(actor: Actor, now: Timestamp) -> Self {
        Self { actor, now }
    }
}

/// Creation and last-update metadata carried by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditInfo {
    pub created_at: Timestamp,
    pub created_by: String,
    pub updated_at: Timestamp,
    pub updated_by: String,
}

impl AuditInfo {
    /// Metadata for a freshly created record: created and updated are identical.
    pub fn created(ctx: &MutationContext) -> Self {
        Self {
            created_at: ctx.now,
            created_by: ctx.actor.to_string(),
            updated_at: ctx.now,
            updated_by: ctx.actor.to_string(),
        }
    }
}

/// Stamp a new record. Sets both the created and updated pairs to `ctx`.
pub fn stamp_create(audit: &mut AuditInfo, ctx: &MutationContext) {
    *audit = AuditInfo::created(ctx);
}

/// Stamp an existing record. Only the updated pair changes.
///
/// `updated_at` never moves backwards: if the supplied clock reads earlier
/// than the stored value, the stored value is kept.
pub fn stamp_update(audit: &mut AuditInfo, ctx: &MutationContext) {
    audit.updated_at = ctx.now.max(audit.updated_at);
    audit.updated_by = ctx.actor.to_string();
}
