use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
