use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::error::AuthError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    status_code: u16,
    error: &'static str,
    description: String,
}

/// Default error mapper.
///
/// Produces `{"status_code": int, "error": string, "description": string}`
/// with the matching HTTP status. `AuthHeaderMissing` additionally carries
/// the `WWW-Authenticate` challenge for the configured scheme and realm.
/// A host override replaces this wholesale; its response is used verbatim.
pub fn default_error_mapper(error: &AuthError, scheme: &str, realm: &str) -> Response {
    let status = error.status();
    let body = Json(ErrorBody {
        status_code: status.as_u16(),
        error: error.label(),
        description: error.to_string(),
    });

    if matches!(error, AuthError::AuthHeaderMissing) {
        let challenge = format!("{scheme} realm=\"{realm}\"");
        return (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response();
    }

    (status, body).into_response()
}
