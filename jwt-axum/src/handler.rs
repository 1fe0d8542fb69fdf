use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::auth::AuthState;
use crate::error::AuthError;
use crate::identity::IdentityStore;

/// Login request body.
///
/// Fields are optional so a missing field is reported as missing
/// credentials rather than a body-level deserialization failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    token: String,
}

/// Login endpoint: exchange credentials for a signed token.
///
/// Exactly one outcome per call and no state is written anywhere; the
/// issued token is the only artifact.
pub async fn login<S: IdentityStore>(
    State(state): State<AuthState<S>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return state.fail(&AuthError::MissingCredentials);
    };

    let identity = match state.store.lookup(&username, &password).await {
        // Host errors pass through untranslated.
        Err(error) => return error.into_response(),
        Ok(None) => {
            tracing::warn!(%username, "login rejected, credentials not recognized");
            return state.fail(&AuthError::InvalidCredentials);
        }
        Ok(Some(identity)) => identity,
    };

    let claims = match state.build_claims(&identity) {
        Ok(claims) => claims,
        Err(error) => {
            tracing::error!(%error, "claims hook collided with a reserved key");
            return state.fail(&error);
        }
    };

    match state.codec.encode(&claims) {
        Ok(token) => (StatusCode::OK, Json(TokenResponse { token })).into_response(),
        Err(error) => {
            tracing::error!(%error, "token encoding failed");
            state.fail(&AuthError::Token(error))
        }
    }
}
