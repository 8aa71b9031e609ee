use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::types::{Track, TrackSearchField};
use crate::error::PlatformError;
use crate::handlers::extract::{Json, Path, Query};
use crate::handlers::principal::Principal;
use crate::state::AppState;
use crate::usecase::listen::PlayTrackUseCase;
use crate::usecase::track::{
    DeleteTrackUseCase, ListTracksUseCase, TrackListing, UpdateTrackInput, UpdateTrackUseCase,
    UploadTrackInput, UploadTrackUseCase,
};

#[derive(Serialize)]
pub struct TrackResponse {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub album_id: Option<Uuid>,
    pub title: String,
    pub genre: Genre,
    pub duration_secs: i32,
    #[serde(serialize_with = "encore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            artist_id: track.artist_id,
            album_id: track.album_id,
            title: track.title,
            genre: track.genre,
            duration_secs: track.duration_secs,
            created_at: track.created_at,
        }
    }
}

fn track_list(tracks: Vec<Track>) -> Json<Vec<TrackResponse>> {
    Json(tracks.into_iter().map(TrackResponse::from).collect())
}

async fn list_with(
    state: &AppState,
    principal: &Principal,
    listing: TrackListing,
    page: PageRequest,
) -> Result<Json<Vec<TrackResponse>>, PlatformError> {
    let usecase = ListTracksUseCase {
        tracks: state.track_repo(),
    };
    let tracks = usecase.execute(&principal.actor(), listing, page).await?;
    Ok(track_list(tracks))
}

// ── POST /tracks ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UploadTrackRequest {
    pub title: String,
    pub genre: Genre,
    pub duration_secs: i32,
    pub album_id: Option<Uuid>,
}

pub async fn upload_track(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<UploadTrackRequest>,
) -> Result<(StatusCode, Json<TrackResponse>), PlatformError> {
    let usecase = UploadTrackUseCase {
        tracks: state.track_repo(),
        albums: state.album_repo(),
    };
    let track = usecase
        .execute(
            &principal.actor(),
            UploadTrackInput {
                title: body.title,
                genre: body.genre,
                duration_secs: body.duration_secs,
                album_id: body.album_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(track.into())))
}

// ── GET /tracks ──────────────────────────────────────────────────────────────

pub async fn list_tracks(
    principal: Principal,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<TrackResponse>>, PlatformError> {
    list_with(&state, &principal, TrackListing::All, page).await
}

// ── GET /tracks/search ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchTracksQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub field: TrackSearchField,
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

pub async fn search_tracks(
    principal: Principal,
    State(state): State<AppState>,
    Query(query): Query<SearchTracksQuery>,
) -> Result<Json<Vec<TrackResponse>>, PlatformError> {
    let default_size = PageRequest::default().size;
    let page = PageRequest::new(query.page, query.size.unwrap_or(default_size));
    let listing = TrackListing::Search {
        keyword: query.keyword,
        field: query.field,
    };
    list_with(&state, &principal, listing, page).await
}

// ── GET /genres/{genre}/tracks ───────────────────────────────────────────────

pub async fn list_tracks_by_genre(
    principal: Principal,
    State(state): State<AppState>,
    Path(genre): Path<Genre>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<TrackResponse>>, PlatformError> {
    list_with(&state, &principal, TrackListing::ByGenre(genre), page).await
}

// ── GET /users/{id}/tracks ───────────────────────────────────────────────────

pub async fn list_tracks_by_artist(
    principal: Principal,
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<TrackResponse>>, PlatformError> {
    list_with(&state, &principal, TrackListing::ByArtist(artist_id), page).await
}

// ── GET /tracks/{id} ─────────────────────────────────────────────────────────

/// Playback: returns the track and counts one play for the caller.
pub async fn play_track(
    principal: Principal,
    State(state): State<AppState>,
    Path(track_id): Path<Uuid>,
) -> Result<Json<TrackResponse>, PlatformError> {
    let usecase = PlayTrackUseCase {
        tracks: state.track_repo(),
        listens: state.listen_repo(),
    };
    let track = usecase.execute(&principal.actor(), track_id).await?;
    Ok(Json(track.into()))
}

// ── PATCH /tracks/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateTrackRequest {
    pub title: String,
    pub duration_secs: i32,
}

pub async fn update_track(
    principal: Principal,
    State(state): State<AppState>,
    Path(track_id): Path<Uuid>,
    Json(body): Json<UpdateTrackRequest>,
) -> Result<Json<TrackResponse>, PlatformError> {
    let usecase = UpdateTrackUseCase {
        tracks: state.track_repo(),
    };
    let track = usecase
        .execute(
            &principal.actor(),
            track_id,
            UpdateTrackInput {
                title: body.title,
                duration_secs: body.duration_secs,
            },
        )
        .await?;
    Ok(Json(track.into()))
}

// ── DELETE /tracks/{id}, DELETE /admin/tracks/{id} ──────────────────────────

async fn delete_with(
    state: &AppState,
    principal: &Principal,
    action: Action,
    track_id: Uuid,
) -> Result<StatusCode, PlatformError> {
    let usecase = DeleteTrackUseCase {
        tracks: state.track_repo(),
    };
    usecase.execute(&principal.actor(), action, track_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_track(
    principal: Principal,
    State(state): State<AppState>,
    Path(track_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::DeleteTrack, track_id).await
}

pub async fn admin_delete_track(
    principal: Principal,
    State(state): State<AppState>,
    Path(track_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::AdminDeleteTrack, track_id).await
}
