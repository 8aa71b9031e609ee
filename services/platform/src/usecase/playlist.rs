use chrono::Utc;
use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::repository::{PlaylistRepository, TrackRepository};
use crate::domain::types::{Actor, Playlist, Track};
use crate::domain::validation::FieldErrors;
use crate::error::PlatformError;
use crate::usecase::{ensure_allowed, ensure_owner_or_admin};

pub struct PlaylistInput {
    pub name: String,
    pub description: Option<String>,
}

impl PlaylistInput {
    fn validate(&self) -> Result<(), PlatformError> {
        let mut errors = FieldErrors::new();
        errors.require_non_blank("name", &self.name);
        errors.into_result()
    }
}

// ── CreatePlaylist ───────────────────────────────────────────────────────────

pub struct CreatePlaylistUseCase<P: PlaylistRepository> {
    pub playlists: P,
}

impl<P: PlaylistRepository> CreatePlaylistUseCase<P> {
    /// `action` is `CreatePlaylist` for listeners and artists and
    /// `CreateAdminPlaylist` for the admin route.
    pub async fn execute(
        &self,
        actor: &Actor,
        action: Action,
        input: PlaylistInput,
    ) -> Result<Playlist, PlatformError> {
        ensure_allowed(actor, action)?;
        input.validate()?;
        let playlist = Playlist {
            id: Uuid::now_v7(),
            owner_id: actor.id,
            name: input.name.trim().to_owned(),
            description: input.description,
            created_at: Utc::now(),
        };
        self.playlists.create(&playlist).await?;
        Ok(playlist)
    }
}

// ── GetPlaylist / ListPlaylists ──────────────────────────────────────────────

pub struct GetPlaylistUseCase<P: PlaylistRepository> {
    pub playlists: P,
}

impl<P: PlaylistRepository> GetPlaylistUseCase<P> {
    pub async fn execute(
        &self,
        actor: &Actor,
        playlist_id: Uuid,
    ) -> Result<(Playlist, Vec<Track>), PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        let playlist = self
            .playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or(PlatformError::PlaylistNotFound)?;
        let tracks = self.playlists.tracks(playlist.id).await?;
        Ok((playlist, tracks))
    }
}

pub struct ListPlaylistsUseCase<P: PlaylistRepository> {
    pub playlists: P,
}

impl<P: PlaylistRepository> ListPlaylistsUseCase<P> {
    pub async fn execute(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Vec<Playlist>, PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        self.playlists.list(page.clamped()).await
    }
}

// ── UpdatePlaylist ───────────────────────────────────────────────────────────

pub struct UpdatePlaylistUseCase<P: PlaylistRepository> {
    pub playlists: P,
}

impl<P: PlaylistRepository> UpdatePlaylistUseCase<P> {
    pub async fn execute(
        &self,
        actor: &Actor,
        action: Action,
        playlist_id: Uuid,
        input: PlaylistInput,
    ) -> Result<Playlist, PlatformError> {
        let mut playlist = self
            .playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or(PlatformError::PlaylistNotFound)?;
        ensure_owner_or_admin(actor, action, playlist.owner_id)?;
        input.validate()?;

        playlist.name = input.name.trim().to_owned();
        playlist.description = input.description;
        self.playlists.update(&playlist).await?;
        Ok(playlist)
    }
}

// ── DeletePlaylist ───────────────────────────────────────────────────────────

pub struct DeletePlaylistUseCase<P: PlaylistRepository> {
    pub playlists: P,
}

impl<P: PlaylistRepository> DeletePlaylistUseCase<P> {
    pub async fn execute(
        &self,
        actor: &Actor,
        action: Action,
        playlist_id: Uuid,
    ) -> Result<(), PlatformError> {
        let playlist = self
            .playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or(PlatformError::PlaylistNotFound)?;
        ensure_owner_or_admin(actor, action, playlist.owner_id)?;
        if !self.playlists.delete(playlist.id).await? {
            return Err(PlatformError::PlaylistNotFound);
        }
        Ok(())
    }
}

// ── AddTrackToPlaylist ───────────────────────────────────────────────────────

pub struct AddTrackToPlaylistUseCase<P: PlaylistRepository, T: TrackRepository> {
    pub playlists: P,
    pub tracks: T,
}

impl<P: PlaylistRepository, T: TrackRepository> AddTrackToPlaylistUseCase<P, T> {
    /// Adding a track that is already present is a no-op. Returns whether it was added.
    pub async fn execute(
        &self,
        actor: &Actor,
        playlist_id: Uuid,
        track_id: Uuid,
    ) -> Result<bool, PlatformError> {
        let playlist = self
            .playlists
            .find_by_id(playlist_id)
            .await?
            .ok_or(PlatformError::PlaylistNotFound)?;
        let track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or(PlatformError::TrackNotFound)?;
        ensure_owner_or_admin(actor, Action::AddTrackToPlaylist, playlist.owner_id)?;
        self.playlists.add_track(playlist.id, track.id).await
    }
}
