use sea_orm::DatabaseConnection;

use encore_auth_types::token::TokenService;

use crate::infra::db::{
    DbAlbumRepository, DbListenRepository, DbPlaylistRepository, DbTrackRepository,
    DbUserRepository,
};
use crate::infra::password::Argon2Hasher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenService,
    pub hasher: Argon2Hasher,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn track_repo(&self) -> DbTrackRepository {
        DbTrackRepository {
            db: self.db.clone(),
        }
    }

    pub fn album_repo(&self) -> DbAlbumRepository {
        DbAlbumRepository {
            db: self.db.clone(),
        }
    }

    pub fn playlist_repo(&self) -> DbPlaylistRepository {
        DbPlaylistRepository {
            db: self.db.clone(),
        }
    }

    pub fn listen_repo(&self) -> DbListenRepository {
        DbListenRepository {
            db: self.db.clone(),
        }
    }
}
