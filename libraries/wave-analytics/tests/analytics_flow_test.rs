//! Integration tests for analytics over real player history

use std::time::Duration;
use wave_analytics::{RevenueLedger, Wrapped, DEFAULT_TOP_LIMIT};
use wave_core::{Catalog, CollectionKind, CreatorRole, SongInfo};
use wave_playback::{LibraryEntry, Player};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

#[test]
fn premium_window_pays_songs_heard_while_subscribed() {
    let mut catalog = Catalog::new();
    let artist = catalog.add_creator("Echo", CreatorRole::Artist).unwrap();
    let other = catalog.add_creator("Quiet", CreatorRole::Artist).unwrap();
    let first = catalog
        .add_song("Free", artist, secs(60), SongInfo::new("Mixed", "indie"))
        .unwrap();
    let second = catalog
        .add_song("Paid", other, secs(60), SongInfo::new("Mixed", "indie"))
        .unwrap();
    let playlist = catalog
        .add_collection("Both", artist, CollectionKind::Playlist, vec![first, second])
        .unwrap();

    let mut player = Player::new();
    player
        .load(&catalog, LibraryEntry::Playlist(playlist))
        .unwrap();
    player.play_pause().unwrap();
    player.advance_time(secs(60)).unwrap();

    assert!(player.begin_premium_segment());
    player.advance_time(secs(60)).unwrap();
    let window = player.end_premium_segment().unwrap();

    let mut revenue = RevenueLedger::new();
    revenue.touch(artist);
    let credited = revenue
        .distribute_premium(&catalog, player.history_window(window), 1_000_000.0)
        .unwrap();
    assert_eq!(credited, 1);

    let ranking = revenue.ranking(&catalog).unwrap();
    assert_eq!(ranking.rows()[0].artist, "Quiet");
    assert_eq!(ranking.rows()[0].song_revenue, 1_000_000.0);
    assert_eq!(ranking.rows()[0].most_profitable_song, "Paid");
    assert_eq!(ranking.rows()[1].artist, "Echo");
    assert_eq!(ranking.rows()[1].song_revenue, 0.0);

    let wrapped = Wrapped::new(&catalog, DEFAULT_TOP_LIMIT)
        .user(player.history().entries())
        .unwrap()
        .unwrap();
    assert_eq!(wrapped.top_albums.entries(), &[("Mixed".to_string(), 2)]);
    assert_eq!(wrapped.top_artists.len(), 2);
}
