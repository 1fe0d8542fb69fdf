use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::auth::AuthState;
use crate::error::AuthError;
use crate::identity::CurrentIdentity;
use crate::identity::IdentityStore;

/// Middleware enforcing a verified token on protected routes.
///
/// The full pipeline runs on every call, in fixed order: header presence,
/// scheme, token shape, decode, identity load. On success the identity and
/// the decoded claims are placed in request extensions and the wrapped
/// handler runs; on failure nothing is populated and the error mapper's
/// response is returned.
pub async fn require_jwt<S: IdentityStore>(
    State(state): State<AuthState<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token(&request, &state.config.scheme) {
        Ok(token) => token,
        Err(error) => {
            tracing::warn!(%error, "rejected unauthenticated request");
            return Err(state.fail(&error));
        }
    };

    let claims = state.codec.decode(token).map_err(|error| {
        tracing::warn!(%error, "token verification failed");
        state.fail(&AuthError::Token(error))
    })?;

    let identity = match state.store.load(&claims.identity).await {
        // Host errors pass through untranslated.
        Err(error) => return Err(error.into_response()),
        Ok(None) => {
            tracing::warn!(subject = %claims.identity, "token subject no longer exists");
            return Err(state.fail(&AuthError::UserNotFound));
        }
        Ok(Some(identity)) => identity,
    };

    request.extensions_mut().insert(CurrentIdentity(identity));
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Parse `Authorization: <scheme> <token>`.
///
/// Detection order is fixed: missing header, scheme mismatch, missing
/// token, extra parts.
fn extract_token<'a>(request: &'a Request, scheme: &str) -> Result<&'a str, AuthError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::AuthHeaderMissing)?;

    // A header that is not visible ASCII has no comparable scheme.
    let value = header.to_str().map_err(|_| AuthError::UnsupportedScheme)?;

    let mut parts = value.split_whitespace();
    let presented = parts.next().unwrap_or("");
    if !presented.eq_ignore_ascii_case(scheme) {
        return Err(AuthError::UnsupportedScheme);
    }

    let token = parts.next().ok_or(AuthError::TokenMissing)?;
    if parts.next().is_some() {
        return Err(AuthError::TokenMalformed);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(auth: Option<&str>) -> Request {
        let builder = Request::builder().uri("/protected");
        let builder = match auth {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => builder,
        };
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_missing_header_detected_first() {
        let request = request_with(None);
        assert!(matches!(
            extract_token(&request, "Bearer"),
            Err(AuthError::AuthHeaderMissing)
        ));
    }

    #[test]
    fn test_scheme_mismatch_before_token_checks() {
        // A bogus scheme wins over every later failure mode.
        for value in ["Bogus", "Bogus xxx", "Bogus a b c", ""] {
            let request = request_with(Some(value));
            assert!(
                matches!(
                    extract_token(&request, "Bearer"),
                    Err(AuthError::UnsupportedScheme)
                ),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_missing_token() {
        let request = request_with(Some("Bearer"));
        assert!(matches!(
            extract_token(&request, "Bearer"),
            Err(AuthError::TokenMissing)
        ));
    }

    #[test]
    fn test_token_with_spaces() {
        let request = request_with(Some("Bearer xxx xxx"));
        assert!(matches!(
            extract_token(&request, "Bearer"),
            Err(AuthError::TokenMalformed)
        ));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for value in ["Bearer tok", "bearer tok", "BEARER tok"] {
            let request = request_with(Some(value));
            assert_eq!(extract_token(&request, "Bearer").unwrap(), "tok");
        }
    }

    #[test]
    fn test_custom_scheme() {
        let request = request_with(Some("JWT tok"));
        assert_eq!(extract_token(&request, "JWT").unwrap(), "tok");

        let request = request_with(Some("Bearer tok"));
        assert!(matches!(
            extract_token(&request, "JWT"),
            Err(AuthError::UnsupportedScheme)
        ));
    }
}
