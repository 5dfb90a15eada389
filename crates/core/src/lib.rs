//! Resource lifecycle engine for the PRSK master data.
//!
//! Creation, partial update and soft deletion of artists, users and tracks,
//! with natural-key uniqueness among live records, referential checks on
//! dependent records, and audit stamping. Storage is abstracted behind the
//! [`store`] traits; this crate has no database or HTTP dependency.

pub mod audit;
pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod pagination;
pub mod references;
pub mod resource;
pub mod store;
pub mod types;
pub mod uniqueness;
