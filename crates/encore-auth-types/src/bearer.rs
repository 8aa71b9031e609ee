//! `Authorization: Bearer <token>` parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;
use http::header::AUTHORIZATION;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed authorization header")]
pub struct MalformedAuthorization;

/// Read the bearer credential from request headers.
///
/// - no `Authorization` header: `Ok(None)`
/// - header present but not a `Bearer` credential: `Err(MalformedAuthorization)`
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<String>, MalformedAuthorization> {
    if !headers.contains_key(AUTHORIZATION) {
        return Ok(None);
    }
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| Some(auth.token().to_owned()))
        .ok_or(MalformedAuthorization)
}
