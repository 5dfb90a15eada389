//! Request extractors shared by handlers.
//!
//! - [`actor::RequestActor`] -- Audit actor and clock for a mutating request.
//! - [`path::EntityId`] -- Positive record id from the path.

pub mod actor;
pub mod path;
