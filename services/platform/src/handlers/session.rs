use axum::extract::State;
use serde::Serialize;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;

use crate::error::PlatformError;
use crate::handlers::extract::{Json, Query};
use crate::handlers::principal::Principal;
use crate::handlers::track::TrackResponse;
use crate::state::AppState;
use crate::usecase::recommendation::SessionPlaylistsUseCase;

#[derive(Serialize)]
pub struct GenrePlaylistResponse {
    pub genre: Genre,
    pub tracks: Vec<TrackResponse>,
}

// ── GET /session/playlists ───────────────────────────────────────────────────

pub async fn get_session_playlists(
    principal: Principal,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<GenrePlaylistResponse>>, PlatformError> {
    let usecase = SessionPlaylistsUseCase {
        listens: state.listen_repo(),
        tracks: state.track_repo(),
    };
    let playlists = usecase.execute(&principal.actor(), page).await?;
    Ok(Json(
        playlists
            .into_iter()
            .map(|p| GenrePlaylistResponse {
                genre: p.genre,
                tracks: p.tracks.into_iter().map(TrackResponse::from).collect(),
            })
            .collect(),
    ))
}
