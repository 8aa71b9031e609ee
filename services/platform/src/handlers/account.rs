use axum::{extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use encore_domain::genre::Genre;
use encore_domain::user::{AccountStatus, UserRole};

use crate::domain::types::{ArtistProfile, User};
use crate::error::PlatformError;
use crate::handlers::extract::{Json, Path, Query};
use crate::handlers::principal::Principal;
use crate::state::AppState;
use crate::usecase::account::{
    ListUsersUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    VerifyEmailInput, VerifyEmailOutcome, VerifyEmailUseCase,
};
use crate::usecase::recommendation::ArtistProfileUseCase;

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "encore_core::serde::to_iso_date_opt")]
    pub birth_date: Option<NaiveDate>,
    pub role: UserRole,
    pub status: AccountStatus,
    pub verified: bool,
    #[serde(serialize_with = "encore_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            birth_date: user.birth_date,
            role: user.role,
            status: user.status,
            verified: user.verified,
            created_at: user.created_at,
        }
    }
}

// ── POST /users/register ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub birth_date: Option<NaiveDate>,
    pub role: Option<UserRole>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), PlatformError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
    };
    let user = usecase
        .execute(RegisterInput {
            first_name: body.first_name,
            last_name: body.last_name,
            username: body.username,
            email: body.email,
            password: body.password,
            birth_date: body.birth_date,
            role: body.role.unwrap_or(UserRole::Listener),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// UNIX seconds.
    pub expires_at: u64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, PlatformError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher,
        tokens: state.tokens.clone(),
    };
    let issued = usecase
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

// ── POST /users/verify ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyEmailResponse {
    pub already_verified: bool,
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailRequest>,
) -> Result<Json<VerifyEmailResponse>, PlatformError> {
    let usecase = VerifyEmailUseCase {
        users: state.user_repo(),
    };
    let outcome = usecase
        .execute(VerifyEmailInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(VerifyEmailResponse {
        already_verified: outcome == VerifyEmailOutcome::AlreadyVerified,
    }))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub page: u32,
}

pub async fn list_users(
    _principal: Principal,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<UserResponse>>, PlatformError> {
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(query.page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(Principal(user): Principal) -> Json<UserResponse> {
    Json(user.into())
}

// ── GET /users/{id}/artist-profile ───────────────────────────────────────────

#[derive(Serialize)]
pub struct ArtistProfileResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub genres: Vec<Genre>,
    pub similar_artists: Vec<String>,
}

impl From<ArtistProfile> for ArtistProfileResponse {
    fn from(profile: ArtistProfile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            username: profile.username,
            genres: profile.genres,
            similar_artists: profile.similar_artists,
        }
    }
}

pub async fn get_artist_profile(
    principal: Principal,
    State(state): State<AppState>,
    Path(artist_id): Path<Uuid>,
) -> Result<Json<ArtistProfileResponse>, PlatformError> {
    let usecase = ArtistProfileUseCase {
        users: state.user_repo(),
        tracks: state.track_repo(),
    };
    let profile = usecase.execute(&principal.actor(), artist_id).await?;
    Ok(Json(profile.into()))
}
