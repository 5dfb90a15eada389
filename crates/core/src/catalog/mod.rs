//! The managed entity types and their request shapes.

pub mod artist;
pub mod track;
pub mod user;

use async_trait::async_trait;

pub use artist::{Artist, ArtistKey, CreateArtist, UpdateArtist};
pub use track::{CreateTrack, MusicType, Track, TrackKey, UnknownMusicType, UpdateTrack};
pub use user::{CreateUser, UpdateUser, User, UserKey};

use crate::error::CoreError;
use crate::references::{resolve_live, ResolveReference};
use crate::resource::{EntityKind, Reference};
use crate::store::Table;

#[async_trait]
impl<T> ResolveReference for T
where
    T: Table<Artist> + Table<User> + Table<Track> + Send,
{
    async fn resolve_reference(&mut self, reference: Reference) -> Result<(), CoreError> {
        match reference.kind {
            EntityKind::Artist => resolve_live::<Artist, _>(self, reference.id).await.map(drop),
            EntityKind::User => resolve_live::<User, _>(self, reference.id).await.map(drop),
            EntityKind::Track => resolve_live::<Track, _>(self, reference.id).await.map(drop),
        }
    }
}
