use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::user::{AccountStatus, UserRole};

/// Stored account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub birth_date: Option<NaiveDate>,
    pub password_hash: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub verified: bool,
    pub verification_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Only active, verified accounts may act on a session token.
    pub fn can_sign_in(&self) -> bool {
        self.status == AccountStatus::Active && self.verified
    }

    pub fn actor(&self) -> Actor {
        Actor {
            id: self.id,
            role: self.role,
        }
    }
}

/// The resolved caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub genre: Option<Genre>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub album_id: Option<Uuid>,
    pub title: String,
    pub genre: Genre,
    pub duration_secs: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of the periodic listen report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenReportRow {
    pub listener_username: String,
    pub track_title: String,
    pub count: i64,
}

/// Tracks suggested for one of the listener's top genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreTracks {
    pub genre: Genre,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub genres: Vec<Genre>,
    pub similar_artists: Vec<String>,
}

/// Which catalog field a track search matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackSearchField {
    Title,
    Artist,
    #[default]
    Any,
}

/// Outbox event for async delivery (verification code email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

pub const VERIFICATION_CODE_CREATED: &str = "verification_code_created";

/// Six-digit verification codes.
pub const VERIFICATION_CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Fixed page size of the user directory.
pub const USER_PAGE_SIZE: u32 = 10;

pub const MIN_PASSWORD_LEN: usize = 8;
