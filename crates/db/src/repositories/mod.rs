//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async row access that
//! takes `&mut PgConnection` as the first argument, so every call joins the
//! caller's transaction. Each module also implements the core `Table` trait
//! for [`crate::PgTx`].

pub mod artist_repo;
pub mod track_repo;
pub mod user_repo;

pub use artist_repo::ArtistRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
