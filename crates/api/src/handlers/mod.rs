//! Request handlers, one module per resource.

pub mod artist;
pub mod track;
pub mod user;
