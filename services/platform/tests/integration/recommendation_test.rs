use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::user::UserRole;
use encore_platform::domain::types::Track;
use encore_platform::error::PlatformError;
use encore_platform::usecase::recommendation::{ArtistProfileUseCase, SessionPlaylistsUseCase};

use crate::helpers::{
    MockListenRepo, MockTrackRepo, MockUserRepo, actor, test_track, test_user,
};

// ── SessionPlaylists ─────────────────────────────────────────────────────────

fn catalog() -> Vec<Track> {
    let artist = Uuid::new_v4();
    let mut tracks = Vec::new();
    let mut seq = 0;
    for genre in [Genre::Rock, Genre::Pop, Genre::Jazz, Genre::Blues] {
        for i in 0..3 {
            tracks.push(test_track(artist, &format!("{genre} {i}"), genre, seq));
            seq += 1;
        }
    }
    tracks
}

fn first_of(tracks: &[Track], genre: Genre) -> Uuid {
    tracks.iter().find(|t| t.genre == genre).map(|t| t.id).unwrap()
}

#[tokio::test]
async fn should_return_empty_for_listener_without_listens() {
    let tracks = catalog();
    let usecase = SessionPlaylistsUseCase {
        listens: MockListenRepo::new(tracks.clone()),
        tracks: MockTrackRepo::new(tracks),
    };

    let playlists = usecase
        .execute(&actor(UserRole::Listener), PageRequest::default())
        .await
        .unwrap();
    assert!(playlists.is_empty());
}

#[tokio::test]
async fn should_rank_top_three_genres_with_canonical_tie_break() {
    let tracks = catalog();
    let caller = actor(UserRole::Listener);
    let listens = MockListenRepo::new(tracks.clone());
    listens.seed(caller.id, first_of(&tracks, Genre::Rock), 5);
    listens.seed(caller.id, first_of(&tracks, Genre::Pop), 2);
    listens.seed(caller.id, first_of(&tracks, Genre::Blues), 1);
    listens.seed(caller.id, first_of(&tracks, Genre::Jazz), 1);
    let usecase = SessionPlaylistsUseCase {
        listens,
        tracks: MockTrackRepo::new(tracks),
    };

    let playlists = usecase
        .execute(&caller, PageRequest::default())
        .await
        .unwrap();
    let genres: Vec<Genre> = playlists.iter().map(|p| p.genre).collect();
    assert_eq!(genres, vec![Genre::Rock, Genre::Pop, Genre::Jazz]);
}

#[tokio::test]
async fn should_sum_counts_across_tracks_of_a_genre() {
    let tracks = catalog();
    let caller = actor(UserRole::Listener);
    let listens = MockListenRepo::new(tracks.clone());
    let pop: Vec<Uuid> = tracks
        .iter()
        .filter(|t| t.genre == Genre::Pop)
        .map(|t| t.id)
        .collect();
    listens.seed(caller.id, pop[0], 2);
    listens.seed(caller.id, pop[1], 2);
    listens.seed(caller.id, first_of(&tracks, Genre::Rock), 3);
    let usecase = SessionPlaylistsUseCase {
        listens,
        tracks: MockTrackRepo::new(tracks),
    };

    let playlists = usecase
        .execute(&caller, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(playlists[0].genre, Genre::Pop);
    assert_eq!(playlists[1].genre, Genre::Rock);
}

#[tokio::test]
async fn should_page_tracks_within_each_genre() {
    let tracks = catalog();
    let caller = actor(UserRole::Listener);
    let listens = MockListenRepo::new(tracks.clone());
    listens.seed(caller.id, first_of(&tracks, Genre::Rock), 1);
    let rock: Vec<Uuid> = tracks
        .iter()
        .filter(|t| t.genre == Genre::Rock)
        .map(|t| t.id)
        .collect();
    let usecase = SessionPlaylistsUseCase {
        listens,
        tracks: MockTrackRepo::new(tracks),
    };

    let first = usecase
        .execute(&caller, PageRequest::new(0, 2))
        .await
        .unwrap();
    let second = usecase
        .execute(&caller, PageRequest::new(1, 2))
        .await
        .unwrap();

    let ids = |p: &[encore_platform::domain::types::GenreTracks]| -> Vec<Uuid> {
        p[0].tracks.iter().map(|t| t.id).collect()
    };
    assert_eq!(ids(&first), rock[..2].to_vec());
    assert_eq!(ids(&second), rock[2..].to_vec());
}

#[tokio::test]
async fn should_clamp_zero_page_size_to_one() {
    let tracks = catalog();
    let caller = actor(UserRole::Listener);
    let listens = MockListenRepo::new(tracks.clone());
    listens.seed(caller.id, first_of(&tracks, Genre::Jazz), 1);
    let usecase = SessionPlaylistsUseCase {
        listens,
        tracks: MockTrackRepo::new(tracks),
    };

    let playlists = usecase
        .execute(&caller, PageRequest::new(0, 0))
        .await
        .unwrap();
    assert_eq!(playlists[0].tracks.len(), 1);
}

// ── ArtistProfile ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_artist() {
    let usecase = ArtistProfileUseCase {
        users: MockUserRepo::default(),
        tracks: MockTrackRepo::default(),
    };

    let result = usecase
        .execute(&actor(UserRole::Listener), Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(PlatformError::UserNotFound)));
}

#[tokio::test]
async fn should_return_empty_similarity_for_artist_without_tracks() {
    let artist = test_user("quiet", UserRole::Artist, 0);
    let other = test_user("loud", UserRole::Artist, 1);
    let tracks = vec![test_track(other.id, "Noise", Genre::Rock, 0)];
    let usecase = ArtistProfileUseCase {
        users: MockUserRepo::with_tracks(vec![artist.clone(), other], tracks.clone()),
        tracks: MockTrackRepo::new(tracks),
    };

    let profile = usecase
        .execute(&actor(UserRole::Listener), artist.id)
        .await
        .unwrap();
    assert!(profile.genres.is_empty());
    assert!(profile.similar_artists.is_empty());
}

#[tokio::test]
async fn should_find_artists_sharing_any_genre_excluding_self() {
    let target = test_user("target", UserRole::Artist, 0);
    let rocker = test_user("rocker", UserRole::Artist, 1);
    let jazzer = test_user("jazzer", UserRole::Artist, 2);
    let folkie = test_user("folkie", UserRole::Artist, 3);
    let tracks = vec![
        test_track(target.id, "A", Genre::Jazz, 0),
        test_track(target.id, "B", Genre::Rock, 1),
        test_track(rocker.id, "C", Genre::Rock, 2),
        test_track(rocker.id, "D", Genre::Rock, 3),
        test_track(jazzer.id, "E", Genre::Jazz, 4),
        test_track(folkie.id, "F", Genre::Folk, 5),
    ];
    let users = vec![target.clone(), rocker, jazzer, folkie];
    let usecase = ArtistProfileUseCase {
        users: MockUserRepo::with_tracks(users, tracks.clone()),
        tracks: MockTrackRepo::new(tracks),
    };

    let profile = usecase
        .execute(&actor(UserRole::Listener), target.id)
        .await
        .unwrap();
    assert_eq!(profile.username, "target");
    assert_eq!(profile.genres, vec![Genre::Rock, Genre::Jazz]);
    assert_eq!(profile.similar_artists, vec!["rocker", "jazzer"]);
}

#[tokio::test]
async fn should_cap_similar_artists_at_ten() {
    let target = test_user("target", UserRole::Artist, 0);
    let mut users = vec![target.clone()];
    let mut tracks = vec![test_track(target.id, "Seed", Genre::Pop, 0)];
    for i in 1..=15 {
        let peer = test_user(&format!("peer{i:02}"), UserRole::Artist, i);
        tracks.push(test_track(peer.id, "Hit", Genre::Pop, i));
        users.push(peer);
    }
    let usecase = ArtistProfileUseCase {
        users: MockUserRepo::with_tracks(users, tracks.clone()),
        tracks: MockTrackRepo::new(tracks),
    };

    let profile = usecase
        .execute(&actor(UserRole::Listener), target.id)
        .await
        .unwrap();
    assert_eq!(profile.similar_artists.len(), 10);
    assert_eq!(profile.similar_artists[0], "peer01");
    assert!(!profile.similar_artists.contains(&"target".to_owned()));
}
