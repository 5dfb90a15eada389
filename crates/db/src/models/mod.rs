//! Row types mapped from the master tables.
//!
//! Each row converts into its domain record in `prsk_core::catalog`.

pub mod artist;
pub mod track;
pub mod user;

pub use artist::ArtistRow;
pub use track::TrackRow;
pub use user::UserRow;
