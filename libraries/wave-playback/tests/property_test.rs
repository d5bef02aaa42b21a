//! Property-based tests for the player
//!
//! Uses proptest to verify invariants across many random libraries and
//! listening patterns.

use proptest::prelude::*;
use std::time::Duration;
use wave_core::{Catalog, CollectionId, CollectionKind, CreatorRole, EpisodeInfo, SongInfo};
use wave_playback::{LibraryEntry, Player, PlayerError, RepeatMode};

// ===== Helpers =====

fn arbitrary_durations() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..400, 1..12)
}

fn build_playlist(durations: &[u64]) -> (Catalog, CollectionId) {
    let mut catalog = Catalog::new();
    let artist = catalog.add_creator("Artist", CreatorRole::Artist).unwrap();
    let songs = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            catalog
                .add_song(
                    format!("Song {i}"),
                    artist,
                    Duration::from_secs(d),
                    SongInfo::new("Album", "pop"),
                )
                .unwrap()
        })
        .collect();
    let playlist = catalog
        .add_collection("Playlist", artist, CollectionKind::Playlist, songs)
        .unwrap();
    (catalog, playlist)
}

fn build_podcast(durations: &[u64]) -> (Catalog, CollectionId) {
    let mut catalog = Catalog::new();
    let host = catalog.add_creator("Host", CreatorRole::Host).unwrap();
    let episodes = durations
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            catalog
                .add_episode(
                    format!("Episode {i}"),
                    host,
                    Duration::from_secs(d),
                    EpisodeInfo::default(),
                )
                .unwrap()
        })
        .collect();
    let podcast = catalog
        .add_collection("Podcast", host, CollectionKind::Podcast, episodes)
        .unwrap();
    (catalog, podcast)
}

/// Playing player with the repeat mode cycled `repeat_steps` times
fn started(catalog: &Catalog, entry: LibraryEntry, repeat_steps: usize) -> Player {
    let mut player = Player::new();
    player.load(catalog, entry).unwrap();
    player.play_pause().unwrap();
    for _ in 0..repeat_steps {
        player.repeat_cycle().unwrap();
    }
    player
}

fn assert_same_state(a: &Player, b: &Player) -> Result<(), TestCaseError> {
    prop_assert_eq!(a.history().entries(), b.history().entries());
    prop_assert_eq!(a.remaining(), b.remaining());
    prop_assert_eq!(a.is_paused(), b.is_paused());
    prop_assert_eq!(a.repeat_mode(), b.repeat_mode());
    prop_assert_eq!(
        a.source().map(|s| s.position()),
        b.source().map(|s| s.position())
    );
    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: advancing by a then b equals advancing by a + b
    #[test]
    fn advance_time_is_additive(
        durations in arbitrary_durations(),
        repeat_steps in 0usize..4,
        a in 0u64..2_000,
        b in 0u64..2_000,
    ) {
        let (catalog, playlist) = build_playlist(&durations);
        let mut split = started(&catalog, LibraryEntry::Playlist(playlist), repeat_steps);
        let mut whole = started(&catalog, LibraryEntry::Playlist(playlist), repeat_steps);

        split.advance_time(Duration::from_secs(a)).unwrap();
        split.advance_time(Duration::from_secs(b)).unwrap();
        whole.advance_time(Duration::from_secs(a + b)).unwrap();

        assert_same_state(&split, &whole)?;
    }

    /// Property: additivity holds for podcasts, including Infinite repeat
    #[test]
    fn podcast_advance_is_additive(
        durations in arbitrary_durations(),
        repeat_steps in 0usize..3,
        a in 0u64..2_000,
        b in 0u64..2_000,
    ) {
        let (catalog, podcast) = build_podcast(&durations);
        let entry = LibraryEntry::Podcast(podcast);
        let mut split = started(&catalog, entry, repeat_steps);
        let mut whole = started(&catalog, entry, repeat_steps);

        split.advance_time(Duration::from_secs(a)).unwrap();
        split.advance_time(Duration::from_secs(b)).unwrap();
        whole.advance_time(Duration::from_secs(a + b)).unwrap();

        assert_same_state(&split, &whole)?;
    }

    /// Property: additivity also holds for single tracks in every repeat mode
    #[test]
    fn single_track_advance_is_additive(
        duration in 1u64..300,
        repeat_steps in 0usize..3,
        a in 0u64..1_000,
        b in 0u64..1_000,
    ) {
        let mut catalog = Catalog::new();
        let artist = catalog.add_creator("Solo", CreatorRole::Artist).unwrap();
        let song = catalog
            .add_song("Only", artist, Duration::from_secs(duration), SongInfo::default())
            .unwrap();

        let run = |deltas: &[u64]| {
            let mut player = Player::new();
            player.load(&catalog, LibraryEntry::Song(song)).unwrap();
            player.play_pause().unwrap();
            for _ in 0..repeat_steps {
                player.repeat_cycle().unwrap();
            }
            for &d in deltas {
                player.advance_time(Duration::from_secs(d)).unwrap();
            }
            player
        };

        assert_same_state(&run(&[a, b]), &run(&[a + b]))?;
    }

    /// Property: shuffle on then off restores natural order around the playing track
    #[test]
    fn shuffle_round_trip_restores_order(
        durations in arbitrary_durations(),
        seed in any::<i64>(),
        elapsed in 0u64..1_000,
    ) {
        let (catalog, playlist) = build_playlist(&durations);
        let mut player = started(&catalog, LibraryEntry::Playlist(playlist), 1);
        player.advance_time(Duration::from_secs(elapsed)).unwrap();

        let order = player.source().unwrap().play_order().to_vec();
        let position = player.source().unwrap().position();
        let remaining = player.remaining();

        prop_assert!(player.shuffle_toggle(seed).unwrap());
        prop_assert_eq!(player.source().unwrap().position(), position);
        prop_assert_eq!(player.remaining(), remaining);

        prop_assert!(!player.shuffle_toggle(seed).unwrap());
        prop_assert_eq!(player.source().unwrap().play_order(), order.as_slice());
        prop_assert_eq!(player.source().unwrap().position(), position);
        prop_assert_eq!(player.remaining(), remaining);
    }

    /// Property: with repeat off, overrunning the playlist pauses on its last track
    #[test]
    fn no_repeat_overrun_pauses_at_last_track(
        durations in arbitrary_durations(),
        extra in 0u64..1_000,
    ) {
        let (catalog, playlist) = build_playlist(&durations);
        let mut player = started(&catalog, LibraryEntry::Playlist(playlist), 0);
        let total: u64 = durations.iter().sum();

        player.advance_time(Duration::from_secs(total + extra)).unwrap();

        let source = player.source().unwrap();
        prop_assert!(player.is_paused());
        prop_assert_eq!(source.position(), durations.len() - 1);
        prop_assert_eq!(player.repeat_mode(), RepeatMode::None);
        prop_assert_eq!(player.history().len(), durations.len());
        prop_assert_eq!(
            player.remaining(),
            Duration::from_secs(*durations.last().unwrap())
        );
    }

    /// Property: loading an empty collection never disturbs the loaded source
    #[test]
    fn empty_load_keeps_previous_source(
        durations in arbitrary_durations(),
        elapsed in 0u64..1_000,
    ) {
        let (mut catalog, playlist) = build_playlist(&durations);
        let owner = catalog.find_creator("Artist").unwrap().id;
        let empty = catalog
            .add_collection("Empty", owner, CollectionKind::Album, vec![])
            .unwrap();

        let mut player = started(&catalog, LibraryEntry::Playlist(playlist), 1);
        player.advance_time(Duration::from_secs(elapsed)).unwrap();
        let position = player.source().unwrap().position();
        let remaining = player.remaining();
        let history_len = player.history().len();

        let err = player.load(&catalog, LibraryEntry::Album(empty)).unwrap_err();

        prop_assert_eq!(err, PlayerError::EmptyCollection);
        prop_assert_eq!(player.source().unwrap().position(), position);
        prop_assert_eq!(player.remaining(), remaining);
        prop_assert_eq!(player.repeat_mode(), RepeatMode::All);
        prop_assert_eq!(player.history().len(), history_len);
    }
}
