use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use encore_core::error::ErrorBody;

/// Platform service error variants.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("track not found")]
    TrackNotFound,
    #[error("album not found")]
    AlbumNotFound,
    #[error("playlist not found")]
    PlaylistNotFound,
    #[error("username already taken")]
    UsernameTaken,
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("account is blocked")]
    AccountBlocked,
    #[error("account is not verified")]
    AccountNotVerified,
    #[error("invalid verification code")]
    InvalidVerificationCode,
    #[error("validation failed")]
    Validation(BTreeMap<String, String>),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl PlatformError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TrackNotFound => "TRACK_NOT_FOUND",
            Self::AlbumNotFound => "ALBUM_NOT_FOUND",
            Self::PlaylistNotFound => "PLAYLIST_NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountBlocked => "ACCOUNT_BLOCKED",
            Self::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            Self::InvalidVerificationCode => "INVALID_VERIFICATION_CODE",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::AccountBlocked | Self::AccountNotVerified => {
                StatusCode::FORBIDDEN
            }
            Self::UserNotFound
            | Self::TrackNotFound
            | Self::AlbumNotFound
            | Self::PlaylistNotFound => StatusCode::NOT_FOUND,
            Self::UsernameTaken | Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidVerificationCode | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        // Log 500s only. TraceLayer already records method/uri/status for every request;
        // the anyhow chain is what makes an internal error traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = ErrorBody::new(self.status(), self.kind(), self.to_string());
        match self {
            Self::Validation(errors) => body.with_errors(errors).into_response(),
            _ => body.into_response(),
        }
    }
}

// ── Extractor rejections ─────────────────────────────────────────────────────

// The rejection text carries serde internals, so it is logged and replaced.
impl PlatformError {
    fn invalid_request(part: &str, message: &str) -> Self {
        Self::Validation(BTreeMap::from([(part.to_owned(), message.to_owned())]))
    }
}

impl From<JsonRejection> for PlatformError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "json body rejected");
        let message = match rejection {
            JsonRejection::JsonDataError(_) => "fields are missing or have the wrong type",
            JsonRejection::JsonSyntaxError(_) => "malformed JSON",
            JsonRejection::MissingJsonContentType(_) => "expected application/json",
            _ => "unreadable request body",
        };
        Self::invalid_request("body", message)
    }
}

impl From<PathRejection> for PlatformError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "path rejected");
        Self::invalid_request("path", "invalid path parameter")
    }
}

impl From<QueryRejection> for PlatformError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "query rejected");
        Self::invalid_request("query", "invalid query parameter")
    }
}
