#![allow(async_fn_in_trait)]

use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::user::UserRole;

use crate::domain::types::{
    Album, ListenReportRow, OutboxEvent, Playlist, Track, TrackSearchField, User,
};
use crate::error::PlatformError;

/// Credential store.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PlatformError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, PlatformError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, PlatformError>;
    async fn exists_by_username(&self, username: &str) -> Result<bool, PlatformError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, PlatformError>;

    /// Insert a new user and its outbox event atomically (same transaction).
    async fn create_with_outbox(
        &self,
        user: &User,
        event: &OutboxEvent,
    ) -> Result<(), PlatformError>;

    /// Persist role, status and verification fields.
    async fn update_account(&self, user: &User) -> Result<(), PlatformError>;

    /// Delete a user with their tracks, albums, playlists and listens.
    /// Returns `true` if deleted, `false` if not found.
    async fn delete_cascade(&self, id: Uuid) -> Result<bool, PlatformError>;

    /// Page through users ordered by first name.
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, PlatformError>;
    async fn list_by_role(
        &self,
        role: UserRole,
        page: PageRequest,
    ) -> Result<Vec<User>, PlatformError>;

    /// Usernames of users other than `exclude` owning at least one track in `genres`,
    /// ordered by (created_at, id), at most `limit`.
    async fn usernames_sharing_genres(
        &self,
        exclude: Uuid,
        genres: &[Genre],
        limit: usize,
    ) -> Result<Vec<String>, PlatformError>;
}

pub trait TrackRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Track>, PlatformError>;
    async fn create(&self, track: &Track) -> Result<(), PlatformError>;
    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        duration_secs: i32,
    ) -> Result<(), PlatformError>;
    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Track>, PlatformError>;
    async fn search(
        &self,
        keyword: &str,
        field: TrackSearchField,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError>;

    /// Tracks of `genre` ordered by (created_at, id).
    async fn list_by_genre(
        &self,
        genre: Genre,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError>;
    async fn list_by_artist(
        &self,
        artist_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError>;

    /// Distinct genres of the artist's tracks, in canonical genre order.
    async fn genres_by_artist(&self, artist_id: Uuid) -> Result<Vec<Genre>, PlatformError>;
}

pub trait AlbumRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Album>, PlatformError>;
    async fn create(&self, album: &Album) -> Result<(), PlatformError>;
    async fn update(&self, album: &Album) -> Result<(), PlatformError>;
    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Album>, PlatformError>;
}

pub trait PlaylistRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, PlatformError>;
    async fn create(&self, playlist: &Playlist) -> Result<(), PlatformError>;
    async fn update(&self, playlist: &Playlist) -> Result<(), PlatformError>;
    async fn delete(&self, id: Uuid) -> Result<bool, PlatformError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<Playlist>, PlatformError>;

    /// Tracks of a playlist in insertion order.
    async fn tracks(&self, playlist_id: Uuid) -> Result<Vec<Track>, PlatformError>;

    /// Append a track. Returns `false` if it was already in the playlist.
    async fn add_track(&self, playlist_id: Uuid, track_id: Uuid) -> Result<bool, PlatformError>;
}

/// Listen counters. `increment` is the only write path.
pub trait ListenRepository: Send + Sync {
    /// Atomic upsert-increment: creates the row with count 1 or adds 1.
    async fn increment(&self, listener_id: Uuid, track_id: Uuid) -> Result<(), PlatformError>;

    /// `(genre, count)` for every listen row of the listener.
    async fn genre_counts(&self, listener_id: Uuid) -> Result<Vec<(Genre, i64)>, PlatformError>;

    async fn report(&self) -> Result<Vec<ListenReportRow>, PlatformError>;
}

/// Salted password hash verifier.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PlatformError>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PlatformError>;
}
