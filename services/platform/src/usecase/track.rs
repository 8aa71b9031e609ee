use chrono::Utc;
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::repository::{AlbumRepository, TrackRepository};
use crate::domain::types::{Actor, Track, TrackSearchField};
use crate::domain::validation::FieldErrors;
use crate::error::PlatformError;
use crate::usecase::{ensure_allowed, ensure_owner_or_admin};

fn validate_details(title: &str, duration_secs: i32) -> Result<(), PlatformError> {
    let mut errors = FieldErrors::new();
    errors.require_non_blank("title", title);
    if duration_secs < 1 {
        errors.add("duration_secs", "must be at least 1");
    }
    errors.into_result()
}

// ── UploadTrack ──────────────────────────────────────────────────────────────

pub struct UploadTrackInput {
    pub title: String,
    pub genre: Genre,
    pub duration_secs: i32,
    pub album_id: Option<Uuid>,
}

pub struct UploadTrackUseCase<T: TrackRepository, A: AlbumRepository> {
    pub tracks: T,
    pub albums: A,
}

impl<T: TrackRepository, A: AlbumRepository> UploadTrackUseCase<T, A> {
    pub async fn execute(
        &self,
        actor: &Actor,
        input: UploadTrackInput,
    ) -> Result<Track, PlatformError> {
        ensure_allowed(actor, Action::UploadTrack)?;
        validate_details(&input.title, input.duration_secs)?;

        if let Some(album_id) = input.album_id {
            let album = self
                .albums
                .find_by_id(album_id)
                .await?
                .ok_or(PlatformError::AlbumNotFound)?;
            ensure_owner_or_admin(actor, Action::UpdateAlbum, album.artist_id)?;
        }

        let track = Track {
            id: Uuid::now_v7(),
            artist_id: actor.id,
            album_id: input.album_id,
            title: input.title.trim().to_owned(),
            genre: input.genre,
            duration_secs: input.duration_secs,
            created_at: Utc::now(),
        };
        self.tracks.create(&track).await?;
        Ok(track)
    }
}

// ── ListTracks ───────────────────────────────────────────────────────────────

pub enum TrackListing {
    All,
    Search {
        keyword: String,
        field: TrackSearchField,
    },
    ByGenre(Genre),
    ByArtist(Uuid),
}

pub struct ListTracksUseCase<T: TrackRepository> {
    pub tracks: T,
}

impl<T: TrackRepository> ListTracksUseCase<T> {
    pub async fn execute(
        &self,
        actor: &Actor,
        listing: TrackListing,
        page: PageRequest,
    ) -> Result<Vec<Track>, PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        let page = page.clamped();
        match listing {
            TrackListing::All => self.tracks.list(page).await,
            TrackListing::Search { keyword, field } => {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    return self.tracks.list(page).await;
                }
                self.tracks.search(keyword, field, page).await
            }
            TrackListing::ByGenre(genre) => self.tracks.list_by_genre(genre, page).await,
            TrackListing::ByArtist(artist_id) => {
                self.tracks.list_by_artist(artist_id, page).await
            }
        }
    }
}

// ── UpdateTrack ──────────────────────────────────────────────────────────────

/// Title and duration only. Genre is fixed at upload.
pub struct UpdateTrackInput {
    pub title: String,
    pub duration_secs: i32,
}

pub struct UpdateTrackUseCase<T: TrackRepository> {
    pub tracks: T,
}

impl<T: TrackRepository> UpdateTrackUseCase<T> {
    pub async fn execute(
        &self,
        actor: &Actor,
        track_id: Uuid,
        input: UpdateTrackInput,
    ) -> Result<Track, PlatformError> {
        let mut track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or(PlatformError::TrackNotFound)?;
        ensure_owner_or_admin(actor, Action::UpdateTrack, track.artist_id)?;
        validate_details(&input.title, input.duration_secs)?;

        track.title = input.title.trim().to_owned();
        track.duration_secs = input.duration_secs;
        self.tracks
            .update_details(track.id, &track.title, track.duration_secs)
            .await?;
        Ok(track)
    }
}

// ── DeleteTrack ──────────────────────────────────────────────────────────────

pub struct DeleteTrackUseCase<T: TrackRepository> {
    pub tracks: T,
}

impl<T: TrackRepository> DeleteTrackUseCase<T> {
    /// `action` is `DeleteTrack` for the owner route and `AdminDeleteTrack` for the
    /// admin route.
    pub async fn execute(
        &self,
        actor: &Actor,
        action: Action,
        track_id: Uuid,
    ) -> Result<(), PlatformError> {
        let track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or(PlatformError::TrackNotFound)?;
        ensure_owner_or_admin(actor, action, track.artist_id)?;
        if !self.tracks.delete(track.id).await? {
            return Err(PlatformError::TrackNotFound);
        }
        Ok(())
    }
}
