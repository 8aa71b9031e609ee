use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;
use encore_domain::user::UserRole;
use encore_platform::domain::types::{Actor, TrackSearchField};
use encore_platform::error::PlatformError;
use encore_platform::usecase::album::{
    AlbumInput, CreateAlbumUseCase, DeleteAlbumUseCase, UpdateAlbumUseCase,
};
use encore_platform::usecase::playlist::{
    AddTrackToPlaylistUseCase, CreatePlaylistUseCase, GetPlaylistUseCase, PlaylistInput,
    UpdatePlaylistUseCase,
};
use encore_platform::usecase::track::{
    DeleteTrackUseCase, ListTracksUseCase, TrackListing, UpdateTrackInput, UpdateTrackUseCase,
    UploadTrackInput, UploadTrackUseCase,
};

use crate::helpers::{
    MockAlbumRepo, MockPlaylistRepo, MockTrackRepo, actor, test_album, test_playlist, test_track,
    test_user,
};

fn upload(title: &str, duration_secs: i32, album_id: Option<Uuid>) -> UploadTrackInput {
    UploadTrackInput {
        title: title.to_owned(),
        genre: Genre::Blues,
        duration_secs,
        album_id,
    }
}

// ── Tracks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_upload_track_owned_by_caller() {
    let caller = actor(UserRole::Artist);
    let tracks = MockTrackRepo::default();
    let usecase = UploadTrackUseCase {
        tracks: tracks.clone(),
        albums: MockAlbumRepo::default(),
    };

    let track = usecase
        .execute(&caller, upload("  Crossroads ", 240, None))
        .await
        .unwrap();
    assert_eq!(track.artist_id, caller.id);
    assert_eq!(track.title, "Crossroads");
    assert!(tracks.get(track.id).is_some());
}

#[tokio::test]
async fn should_reject_zero_duration() {
    let usecase = UploadTrackUseCase {
        tracks: MockTrackRepo::default(),
        albums: MockAlbumRepo::default(),
    };

    match usecase
        .execute(&actor(UserRole::Artist), upload("Silence", 0, None))
        .await
    {
        Err(PlatformError::Validation(errors)) => assert!(errors.contains_key("duration_secs")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_reject_upload_into_missing_album() {
    let usecase = UploadTrackUseCase {
        tracks: MockTrackRepo::default(),
        albums: MockAlbumRepo::default(),
    };

    let result = usecase
        .execute(
            &actor(UserRole::Artist),
            upload("Lost", 100, Some(Uuid::new_v4())),
        )
        .await;
    assert!(matches!(result, Err(PlatformError::AlbumNotFound)));
}

#[tokio::test]
async fn should_reject_upload_into_foreign_album() {
    let album = test_album(Uuid::new_v4());
    let usecase = UploadTrackUseCase {
        tracks: MockTrackRepo::default(),
        albums: MockAlbumRepo::new(vec![album.clone()]),
    };

    let result = usecase
        .execute(&actor(UserRole::Artist), upload("Cuckoo", 100, Some(album.id)))
        .await;
    assert!(matches!(result, Err(PlatformError::Forbidden)));
}

#[tokio::test]
async fn should_return_not_found_before_forbidden_on_update() {
    let stranger = actor(UserRole::Listener);
    let usecase = UpdateTrackUseCase {
        tracks: MockTrackRepo::default(),
    };

    let result = usecase
        .execute(
            &stranger,
            Uuid::new_v4(),
            UpdateTrackInput {
                title: "x".to_owned(),
                duration_secs: 10,
            },
        )
        .await;
    assert!(matches!(result, Err(PlatformError::TrackNotFound)));
}

#[tokio::test]
async fn should_forbid_updating_someone_elses_track() {
    let track = test_track(Uuid::new_v4(), "Mine", Genre::Rock, 0);
    let usecase = UpdateTrackUseCase {
        tracks: MockTrackRepo::new(vec![track.clone()]),
    };

    let result = usecase
        .execute(
            &actor(UserRole::Artist),
            track.id,
            UpdateTrackInput {
                title: "Yours".to_owned(),
                duration_secs: 10,
            },
        )
        .await;
    assert!(matches!(result, Err(PlatformError::Forbidden)));
}

#[tokio::test]
async fn should_update_title_and_duration_only() {
    let owner = actor(UserRole::Artist);
    let track = test_track(owner.id, "Draft", Genre::Metal, 0);
    let tracks = MockTrackRepo::new(vec![track.clone()]);
    let usecase = UpdateTrackUseCase {
        tracks: tracks.clone(),
    };

    let updated = usecase
        .execute(
            &owner,
            track.id,
            UpdateTrackInput {
                title: "Final".to_owned(),
                duration_secs: 301,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.genre, Genre::Metal);
    assert_eq!(tracks.get(track.id).unwrap().duration_secs, 301);
}

#[tokio::test]
async fn should_let_admin_delete_any_track_only_through_admin_action() {
    let track = test_track(Uuid::new_v4(), "Gone", Genre::Pop, 0);
    let tracks = MockTrackRepo::new(vec![track.clone()]);
    let usecase = DeleteTrackUseCase {
        tracks: tracks.clone(),
    };

    let artist = actor(UserRole::Artist);
    let denied = usecase
        .execute(&artist, Action::AdminDeleteTrack, track.id)
        .await;
    assert!(matches!(denied, Err(PlatformError::Forbidden)));

    let admin = actor(UserRole::Admin);
    usecase
        .execute(&admin, Action::AdminDeleteTrack, track.id)
        .await
        .unwrap();
    assert!(tracks.get(track.id).is_none());
}

#[tokio::test]
async fn should_search_by_title_and_artist() {
    let miles = test_user("miles", UserRole::Artist, 0);
    let nina = test_user("nina", UserRole::Artist, 1);
    let tracks = vec![
        test_track(miles.id, "Blue in Green", Genre::Jazz, 0),
        test_track(nina.id, "Feeling Good", Genre::Jazz, 1),
        test_track(nina.id, "Blue Prelude", Genre::Blues, 2),
    ];
    let usecase = ListTracksUseCase {
        tracks: MockTrackRepo::with_artists(tracks, &[&miles, &nina]),
    };
    let caller = actor(UserRole::Listener);
    let search = |keyword: &str, field| TrackListing::Search {
        keyword: keyword.to_owned(),
        field,
    };

    let by_title = usecase
        .execute(&caller, search("BLUE", TrackSearchField::Title), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(by_title.len(), 2);

    let by_artist = usecase
        .execute(&caller, search("nin", TrackSearchField::Artist), PageRequest::default())
        .await
        .unwrap();
    assert!(by_artist.iter().all(|t| t.artist_id == nina.id));
    assert_eq!(by_artist.len(), 2);

    let by_genre = usecase
        .execute(&caller, TrackListing::ByGenre(Genre::Jazz), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(by_genre.len(), 2);
}

// ── Albums ───────────────────────────────────────────────────────────────────

fn album_input(title: &str) -> AlbumInput {
    AlbumInput {
        title: title.to_owned(),
        description: Some("liner notes".to_owned()),
        release_date: None,
        genre: Some(Genre::Folk),
    }
}

#[tokio::test]
async fn should_create_album_for_caller() {
    let caller = actor(UserRole::Artist);
    let albums = MockAlbumRepo::default();
    let usecase = CreateAlbumUseCase {
        albums: albums.clone(),
    };

    let album = usecase.execute(&caller, album_input("Blue")).await.unwrap();
    assert_eq!(album.artist_id, caller.id);
    assert!(albums.get(album.id).is_some());
}

#[tokio::test]
async fn should_let_admin_update_any_album() {
    let album = test_album(Uuid::new_v4());
    let albums = MockAlbumRepo::new(vec![album.clone()]);
    let usecase = UpdateAlbumUseCase {
        albums: albums.clone(),
    };

    usecase
        .execute(&actor(UserRole::Admin), album.id, album_input("Remaster"))
        .await
        .unwrap();
    assert_eq!(albums.get(album.id).unwrap().title, "Remaster");
}

#[tokio::test]
async fn should_return_album_not_found_for_unauthorized_delete() {
    let usecase = DeleteAlbumUseCase {
        albums: MockAlbumRepo::default(),
    };

    let result = usecase
        .execute(
            &actor(UserRole::Listener),
            Action::AdminDeleteAlbum,
            Uuid::new_v4(),
        )
        .await;
    assert!(matches!(result, Err(PlatformError::AlbumNotFound)));
}

// ── Playlists ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_track_once() {
    let owner = actor(UserRole::Listener);
    let playlist = test_playlist(owner.id);
    let track = test_track(Uuid::new_v4(), "Loop", Genre::Electronic, 0);
    let playlists = MockPlaylistRepo::new(vec![playlist.clone()], vec![track.clone()]);
    let usecase = AddTrackToPlaylistUseCase {
        playlists: playlists.clone(),
        tracks: MockTrackRepo::new(vec![track.clone()]),
    };

    assert!(usecase.execute(&owner, playlist.id, track.id).await.unwrap());
    assert!(!usecase.execute(&owner, playlist.id, track.id).await.unwrap());

    let get = GetPlaylistUseCase { playlists };
    let (_, tracks) = get.execute(&owner, playlist.id).await.unwrap();
    assert_eq!(tracks.len(), 1);
}

#[tokio::test]
async fn should_reject_adding_missing_track() {
    let owner = actor(UserRole::Listener);
    let playlist = test_playlist(owner.id);
    let usecase = AddTrackToPlaylistUseCase {
        playlists: MockPlaylistRepo::new(vec![playlist.clone()], vec![]),
        tracks: MockTrackRepo::default(),
    };

    let result = usecase.execute(&owner, playlist.id, Uuid::new_v4()).await;
    assert!(matches!(result, Err(PlatformError::TrackNotFound)));
}

#[tokio::test]
async fn should_forbid_adding_to_foreign_playlist() {
    let playlist = test_playlist(Uuid::new_v4());
    let track = test_track(Uuid::new_v4(), "Loop", Genre::Electronic, 0);
    let usecase = AddTrackToPlaylistUseCase {
        playlists: MockPlaylistRepo::new(vec![playlist.clone()], vec![track.clone()]),
        tracks: MockTrackRepo::new(vec![track.clone()]),
    };

    let result = usecase
        .execute(&actor(UserRole::Artist), playlist.id, track.id)
        .await;
    assert!(matches!(result, Err(PlatformError::Forbidden)));
}

#[tokio::test]
async fn should_reserve_admin_playlist_creation_for_admins() {
    let usecase = CreatePlaylistUseCase {
        playlists: MockPlaylistRepo::default(),
    };
    let input = || PlaylistInput {
        name: "Staff picks".to_owned(),
        description: None,
    };

    let denied = usecase
        .execute(&actor(UserRole::Artist), Action::CreateAdminPlaylist, input())
        .await;
    assert!(matches!(denied, Err(PlatformError::Forbidden)));

    let admin: Actor = actor(UserRole::Admin);
    let created = usecase
        .execute(&admin, Action::CreateAdminPlaylist, input())
        .await
        .unwrap();
    assert_eq!(created.owner_id, admin.id);
}

#[tokio::test]
async fn should_reject_admin_update_from_owner_without_admin_role() {
    let owner = actor(UserRole::Listener);
    let playlist = test_playlist(owner.id);
    let usecase = UpdatePlaylistUseCase {
        playlists: MockPlaylistRepo::new(vec![playlist.clone()], vec![]),
    };

    let result = usecase
        .execute(
            &owner,
            Action::AdminUpdatePlaylist,
            playlist.id,
            PlaylistInput {
                name: "Renamed".to_owned(),
                description: None,
            },
        )
        .await;
    assert!(matches!(result, Err(PlatformError::Forbidden)));
}
