use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::pagination::PageRequest;
use encore_domain::policy::Action;

use crate::domain::repository::AlbumRepository;
use crate::domain::types::{Actor, Album};
use crate::domain::validation::FieldErrors;
use crate::error::PlatformError;
use crate::usecase::{ensure_allowed, ensure_owner_or_admin};

pub struct AlbumInput {
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
}

impl AlbumInput {
    fn validate(&self) -> Result<(), PlatformError> {
        let mut errors = FieldErrors::new();
        errors.require_non_blank("title", &self.title);
        errors.into_result()
    }
}

// ── CreateAlbum ──────────────────────────────────────────────────────────────

pub struct CreateAlbumUseCase<A: AlbumRepository> {
    pub albums: A,
}

impl<A: AlbumRepository> CreateAlbumUseCase<A> {
    pub async fn execute(&self, actor: &Actor, input: AlbumInput) -> Result<Album, PlatformError> {
        ensure_allowed(actor, Action::CreateAlbum)?;
        input.validate()?;
        let album = Album {
            id: Uuid::now_v7(),
            artist_id: actor.id,
            title: input.title.trim().to_owned(),
            description: input.description,
            release_date: input.release_date,
            genre: input.genre,
            created_at: Utc::now(),
        };
        self.albums.create(&album).await?;
        Ok(album)
    }
}

// ── GetAlbum / ListAlbums ────────────────────────────────────────────────────

pub struct GetAlbumUseCase<A: AlbumRepository> {
    pub albums: A,
}

impl<A: AlbumRepository> GetAlbumUseCase<A> {
    pub async fn execute(&self, actor: &Actor, album_id: Uuid) -> Result<Album, PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        self.albums
            .find_by_id(album_id)
            .await?
            .ok_or(PlatformError::AlbumNotFound)
    }
}

pub struct ListAlbumsUseCase<A: AlbumRepository> {
    pub albums: A,
}

impl<A: AlbumRepository> ListAlbumsUseCase<A> {
    pub async fn execute(
        &self,
        actor: &Actor,
        page: PageRequest,
    ) -> Result<Vec<Album>, PlatformError> {
        ensure_allowed(actor, Action::ReadCatalog)?;
        self.albums.list(page.clamped()).await
    }
}

// ── UpdateAlbum ──────────────────────────────────────────────────────────────

pub struct UpdateAlbumUseCase<A: AlbumRepository> {
    pub albums: A,
}

impl<A: AlbumRepository> UpdateAlbumUseCase<A> {
    pub async fn execute(
        &self,
        actor: &Actor,
        album_id: Uuid,
        input: AlbumInput,
    ) -> Result<Album, PlatformError> {
        let mut album = self
            .albums
            .find_by_id(album_id)
            .await?
            .ok_or(PlatformError::AlbumNotFound)?;
        ensure_owner_or_admin(actor, Action::UpdateAlbum, album.artist_id)?;
        input.validate()?;

        album.title = input.title.trim().to_owned();
        album.description = input.description;
        album.release_date = input.release_date;
        album.genre = input.genre;
        self.albums.update(&album).await?;
        Ok(album)
    }
}

// ── DeleteAlbum ──────────────────────────────────────────────────────────────

pub struct DeleteAlbumUseCase<A: AlbumRepository> {
    pub albums: A,
}

impl<A: AlbumRepository> DeleteAlbumUseCase<A> {
    pub async fn execute(
        &self,
        actor: &Actor,
        action: Action,
        album_id: Uuid,
    ) -> Result<(), PlatformError> {
        let album = self
            .albums
            .find_by_id(album_id)
            .await?
            .ok_or(PlatformError::AlbumNotFound)?;
        ensure_owner_or_admin(actor, action, album.artist_id)?;
        if !self.albums.delete(album.id).await? {
            return Err(PlatformError::AlbumNotFound);
        }
        Ok(())
    }
}
