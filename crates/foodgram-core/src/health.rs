use axum::http::StatusCode;

/// `GET /healthz`: liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a dependency probe result to the status returned by `GET /readyz`.
pub fn readiness(dependencies_ok: bool) -> StatusCode {
    if dependencies_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
