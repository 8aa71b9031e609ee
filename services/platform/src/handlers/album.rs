use axum::{extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::types::Album;
use crate::error::PlatformError;
use crate::handlers::extract::{Json, Path, Query};
use crate::handlers::principal::Principal;
use crate::state::AppState;
use crate::usecase::album::{
    AlbumInput, CreateAlbumUseCase, DeleteAlbumUseCase, GetAlbumUseCase, ListAlbumsUseCase,
    UpdateAlbumUseCase,
};

#[derive(Deserialize)]
pub struct AlbumRequest {
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
}

impl From<AlbumRequest> for AlbumInput {
    fn from(body: AlbumRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            release_date: body.release_date,
            genre: body.genre,
        }
    }
}

#[derive(Serialize)]
pub struct AlbumResponse {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[serde(serialize_with = "encore_core::serde::to_iso_date_opt")]
    pub release_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
    #[serde(serialize_with = "encore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            artist_id: album.artist_id,
            title: album.title,
            description: album.description,
            release_date: album.release_date,
            genre: album.genre,
            created_at: album.created_at,
        }
    }
}

// ── POST /albums ─────────────────────────────────────────────────────────────

pub async fn create_album(
    principal: Principal,
    State(state): State<AppState>,
    Json(body): Json<AlbumRequest>,
) -> Result<(StatusCode, Json<AlbumResponse>), PlatformError> {
    let usecase = CreateAlbumUseCase {
        albums: state.album_repo(),
    };
    let album = usecase.execute(&principal.actor(), body.into()).await?;
    Ok((StatusCode::CREATED, Json(album.into())))
}

// ── GET /albums, GET /albums/{id} ────────────────────────────────────────────

pub async fn list_albums(
    principal: Principal,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<AlbumResponse>>, PlatformError> {
    let usecase = ListAlbumsUseCase {
        albums: state.album_repo(),
    };
    let albums = usecase.execute(&principal.actor(), page).await?;
    Ok(Json(albums.into_iter().map(AlbumResponse::from).collect()))
}

pub async fn get_album(
    principal: Principal,
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
) -> Result<Json<AlbumResponse>, PlatformError> {
    let usecase = GetAlbumUseCase {
        albums: state.album_repo(),
    };
    let album = usecase.execute(&principal.actor(), album_id).await?;
    Ok(Json(album.into()))
}

// ── PUT /albums/{id} ─────────────────────────────────────────────────────────

pub async fn update_album(
    principal: Principal,
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
    Json(body): Json<AlbumRequest>,
) -> Result<Json<AlbumResponse>, PlatformError> {
    let usecase = UpdateAlbumUseCase {
        albums: state.album_repo(),
    };
    let album = usecase
        .execute(&principal.actor(), album_id, body.into())
        .await?;
    Ok(Json(album.into()))
}

// ── DELETE /albums/{id}, DELETE /admin/albums/{id} ──────────────────────────

async fn delete_with(
    state: &AppState,
    principal: &Principal,
    action: Action,
    album_id: Uuid,
) -> Result<StatusCode, PlatformError> {
    let usecase = DeleteAlbumUseCase {
        albums: state.album_repo(),
    };
    usecase.execute(&principal.actor(), action, album_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_album(
    principal: Principal,
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::DeleteAlbum, album_id).await
}

pub async fn admin_delete_album(
    principal: Principal,
    State(state): State<AppState>,
    Path(album_id): Path<Uuid>,
) -> Result<StatusCode, PlatformError> {
    delete_with(&state, &principal, Action::AdminDeleteAlbum, album_id).await
}
