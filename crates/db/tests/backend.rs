//! The `Backend` dispatcher over the in-memory store. Needs no database.

use assert_matches::assert_matches;
use chrono::Utc;
use prsk_core::audit::{Actor, MutationContext};
use prsk_core::catalog::{Artist, CreateArtist, CreateTrack, MusicType, Track};
use prsk_core::error::CoreError;
use prsk_core::lifecycle::Lifecycle;
use prsk_core::pagination::PageRequest;
use prsk_core::resource::Resource;
use prsk_core::store::{MemoryStore, Store};
use prsk_db::Backend;

fn ctx() -> MutationContext {
    MutationContext::new(Actor::new("system"), Utc::now())
}

fn engine() -> Lifecycle<Backend> {
    Lifecycle::new(Backend::Memory(MemoryStore::new()))
}

#[tokio::test]
async fn memory_backend_runs_full_lifecycle() {
    let engine = engine();
    assert_eq!(engine.store().name(), "memory");
    engine.store().ping().await.unwrap();

    let artist: Artist = engine
        .create(
            CreateArtist {
                artist_name: "Leo/need".to_string(),
                unit_name: None,
                content: None,
            },
            &ctx(),
        )
        .await
        .unwrap();

    let track: Track = engine
        .create(
            CreateTrack {
                title: "Stella".to_string(),
                music_type: MusicType::Original,
                artist_id: artist.id,
                specially: Some(true),
                lyrics_name: None,
                music_name: None,
                featuring: None,
                youtube_link: None,
            },
            &ctx(),
        )
        .await
        .unwrap();
    assert_eq!(track.artist_id, artist.id);

    engine.soft_delete::<Track>(track.id, &ctx()).await.unwrap();
    let err = engine.find_live::<Track>(track.id).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Track", .. });

    let page = engine
        .list::<Artist>(&PageRequest::resolve(Artist::SORTABLE, None, None, None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(page.meta.total_count, 1);
}
