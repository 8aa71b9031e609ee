use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;
use encore_domain::recommendation::{
    SIMILAR_ARTISTS_LIMIT, TOP_GENRES, aggregate_genres, top_genres,
};

use crate::domain::repository::{ListenRepository, TrackRepository, UserRepository};
use crate::domain::types::{Actor, ArtistProfile, GenreTracks};
use crate::error::PlatformError;
use crate::usecase::ensure_allowed;

// ── SessionPlaylists ─────────────────────────────────────────────────────────

/// Suggest tracks from the listener's three most played genres.
///
/// Genres are ranked by summed listen count, ties broken by canonical genre order.
/// Each genre gets one offset page over all of its tracks, not only played ones.
/// A listener without listens gets an empty list.
pub struct SessionPlaylistsUseCase<L: ListenRepository, T: TrackRepository> {
    pub listens: L,
    pub tracks: T,
}

impl<L: ListenRepository, T: TrackRepository> SessionPlaylistsUseCase<L, T> {
    pub async fn execute(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Vec<GenreTracks>, PlatformError> {
        ensure_allowed(actor, Action::ReadRecommendations)?;
        let page = page.clamped();

        let sums = aggregate_genres(self.listens.genre_counts(actor.id).await?);
        let ranked = top_genres(&sums, TOP_GENRES);

        let mut playlists = Vec::with_capacity(ranked.len());
        for genre in ranked {
            let tracks = self.tracks.list_by_genre(genre, page).await?;
            playlists.push(GenreTracks { genre, tracks });
        }
        Ok(playlists)
    }
}

// ── ArtistProfile ────────────────────────────────────────────────────────────

/// Artist card with up to ten other users publishing in any of the artist's genres.
pub struct ArtistProfileUseCase<U: UserRepository, T: TrackRepository> {
    pub users: U,
    pub tracks: T,
}

impl<U: UserRepository, T: TrackRepository> ArtistProfileUseCase<U, T> {
    pub async fn execute(
        &self,
        actor: &Actor,
        artist_id: Uuid,
    ) -> Result<ArtistProfile, PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        let artist = self
            .users
            .find_by_id(artist_id)
            .await?
            .ok_or(PlatformError::UserNotFound)?;

        let genres = self.tracks.genres_by_artist(artist.id).await?;
        let similar_artists = if genres.is_empty() {
            Vec::new()
        } else {
            self.users
                .usernames_sharing_genres(artist.id, &genres, SIMILAR_ARTISTS_LIMIT)
                .await?
        };

        Ok(ArtistProfile {
            id: artist.id,
            first_name: artist.first_name,
            last_name: artist.last_name,
            username: artist.username,
            genres,
            similar_artists,
        })
    }
}
