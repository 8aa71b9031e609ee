//! Request extractors whose rejections render as the standard error payload.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::PlatformError;

/// JSON body. Doubles as the JSON response type.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(PlatformError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PlatformError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(PlatformError))]
pub struct Query<T>(pub T);
