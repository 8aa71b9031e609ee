use uuid::Uuid;

use encore_domain::policy::Action;

use crate::domain::repository::{ListenRepository, TrackRepository};
use crate::domain::types::{Actor, Track};
use crate::error::PlatformError;
use crate::usecase::ensure_allowed;

// ── RecordPlay ───────────────────────────────────────────────────────────────

/// Count one play of `track_id` by `listener_id`.
///
/// The increment is a single upsert in the store, so concurrent plays of the same
/// pair never lose an update and never create a second row.
pub struct RecordPlayUseCase<L: ListenRepository> {
    pub listens: L,
}

impl<L: ListenRepository> RecordPlayUseCase<L> {
    pub async fn execute(&self, listener_id: Uuid, track_id: Uuid) -> Result<(), PlatformError> {
        self.listens.increment(listener_id, track_id).await
    }
}

// ── PlayTrack ────────────────────────────────────────────────────────────────

/// Fetch a track for playback and record the play for the caller.
pub struct PlayTrackUseCase<T: TrackRepository, L: ListenRepository> {
    pub tracks: T,
    pub listens: L,
}

impl<T: TrackRepository, L: ListenRepository> PlayTrackUseCase<T, L> {
    pub async fn execute(&self, actor: &Actor, track_id: Uuid) -> Result<Track, PlatformError> {
        ensure_allowed(actor, Action::PlayTrack)?;
        let track = self
            .tracks
            .find_by_id(track_id)
            .await?
            .ok_or(PlatformError::TrackNotFound)?;
        self.listens.increment(actor.id, track.id).await?;
        Ok(track)
    }
}
