use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::types::Playlist;
use crate::error::PlatformError;
use crate::handlers::extract::{Json, Path, Query};
use crate::handlers::principal::Principal;
use crate::handlers::track::TrackResponse;
use crate::state::AppState;
use crate::usecase::playlist::{
    AddTrackToPlaylistUseCase, CreatePlaylistUseCase, DeletePlaylistUseCase, GetPlaylistUseCase,
    ListPlaylistsUseCase, PlaylistInput, UpdatePlaylistUseCase,
};

#[derive(Deserialize)]
pub struct PlaylistRequest {
    pub name: String,
    pub description: Option<String>,
}

impl From<PlaylistRequest> for PlaylistInput {
    fn from(body: PlaylistRequest) -> Self {
        Self {
            name: body.name,
            description: body.description,
        }
    }
}

#[derive(Serialize)]
pub struct PlaylistResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "encore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Playlist> for PlaylistResponse {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            owner_id: playlist.owner_id,
            name: playlist.name,
            description: playlist.description,
            created_at: playlist.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct PlaylistDetailResponse {
    #[serde(flatten)]
    pub playlist: PlaylistResponse,
    pub tracks: Vec<TrackResponse>,
}

// ── POST /playlists, POST /admin/playlists ───────────────────────────────────

async fn create_with(
    state: &AppState,
    principal: &Principal,
    action: Action,
    body: PlaylistRequest,
) -> Result<(StatusCode, Json<PlaylistResponse>), PlatformError> {
    let usecase = CreatePlaylistUseCase {
        playlists: state.playlist_repo(),
    };
    let playlist = usecase
        .execute(&principal.actor(), action, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(playlist.into())))
}

pub async fn create_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<PlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistResponse>), PlatformError> {
    create_with(&state, &principal, Action::CreatePlaylist, body).await
}

pub async fn admin_create_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<PlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistResponse>), PlatformError> {
    create_with(&state, &principal, Action::CreateAdminPlaylist, body).await
}

// ── GET /playlists, GET /playlists/{id} ──────────────────────────────────────

pub async fn list_playlists(
    principal: Principal,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<PlaylistResponse>>, PlatformError> {
    let usecase = ListPlaylistsUseCase {
        playlists: state.playlist_repo(),
    };
    let playlists = usecase.execute(&principal.actor(), page).await?;
    Ok(Json(
        playlists.into_iter().map(PlaylistResponse::from).collect(),
    ))
}

pub async fn get_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
) -> Result<Json<PlaylistDetailResponse>, PlatformError> {
    let usecase = GetPlaylistUseCase {
        playlists: state.playlist_repo(),
    };
    let (playlist, tracks) = usecase.execute(&principal.actor(), playlist_id).await?;
    Ok(Json(PlaylistDetailResponse {
        playlist: playlist.into(),
        tracks: tracks.into_iter().map(TrackResponse::from).collect(),
    }))
}

// ── PUT /playlists/{id}, PUT /admin/playlists/{id} ───────────────────────────

async fn update_with(
    state: &AppState,
    principal: &Principal,
    action: Action,
    playlist_id: Uuid,
    body: PlaylistRequest,
) -> Result<Json<PlaylistResponse>, PlatformError> {
    let usecase = UpdatePlaylistUseCase {
        playlists: state.playlist_repo(),
    };
    let playlist = usecase
        .execute(&principal.actor(), action, playlist_id, body.into())
        .await?;
    Ok(Json(playlist.into()))
}

pub async fn update_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Json(body): Json<PlaylistRequest>,
) -> Result<Json<PlaylistResponse>, PlatformError> {
    update_with(&state, &principal, Action::UpdatePlaylist, playlist_id, body).await
}

pub async fn admin_update_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Json(body): Json<PlaylistRequest>,
) -> Result<Json<PlaylistResponse>, PlatformError> {
    update_with(
        &state,
        &principal,
        Action::AdminUpdatePlaylist,
        playlist_id,
        body,
    )
    .await
}

// ── DELETE /playlists/{id}, DELETE /admin/playlists/{id} ─────────────────────

async fn delete_with(
    state: &AppState,
    principal: &Principal,
    action: Action,
    playlist_id: Uuid,
) -> Result<StatusCode, PlatformError> {
    let usecase = DeletePlaylistUseCase {
        playlists: state.playlist_repo(),
    };
    usecase
        .execute(&principal.actor(), action, playlist_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::DeletePlaylist, playlist_id).await
}

pub async fn admin_delete_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::AdminDeletePlaylist, playlist_id).await
}

// ── POST /playlists/{id}/tracks ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddTrackRequest {
    pub track_id: Uuid,
}

/// 201 when the track was appended, 200 when it was already there.
pub async fn add_track_to_playlist(
    principal: Principal,
    State(state): State<AppState>,
    Path(playlist_id): Path<Uuid>,
    Json(body): Json<AddTrackRequest>,
) -> Result<StatusCode, PlatformError> {
    let usecase = AddTrackToPlaylistUseCase {
        playlists: state.playlist_repo(),
        tracks: state.track_repo(),
    };
    let added = usecase
        .execute(&principal.actor(), playlist_id, body.track_id)
        .await?;
    Ok(if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    })
}
