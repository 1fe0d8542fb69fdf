use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// An authenticated principal.
///
/// The core never inspects the host's identity type beyond the subject
/// identifier it contributes to the token payload.
pub trait Identity: Clone + Send + Sync + 'static {
    /// Opaque scalar identifying the principal; becomes the token's
    /// `identity` claim.
    fn id(&self) -> serde_json::Value;
}

/// Host-supplied credential verification and identity loading.
///
/// `lookup` backs the login endpoint; `load` re-creates the identity from
/// a verified token's subject on every protected-route call (identities
/// are never cached across requests). `load` returning `Ok(None)` means
/// the user no longer exists even though the token verified.
///
/// Errors are the host's own. They are returned to the client through
/// their `IntoResponse` impl, untouched by the auth error taxonomy. Hosts
/// without failure modes can use `std::convert::Infallible`.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    type Identity: Identity;
    type Error: IntoResponse + Send;

    /// Verify raw credentials, yielding the identity they belong to.
    async fn lookup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Self::Identity>, Self::Error>;

    /// Load the identity a token subject refers to.
    async fn load(
        &self,
        subject: &serde_json::Value,
    ) -> Result<Option<Self::Identity>, Self::Error>;
}

/// Request-scoped authenticated identity.
///
/// Inserted into request extensions by the guard on successful
/// verification, and only then; failures leave it absent. Lives exactly as
/// long as the request, so nothing leaks across concurrent requests.
#[derive(Debug, Clone)]
pub struct CurrentIdentity<I>(pub I);

#[async_trait]
impl<S, I> FromRequestParts<S> for CurrentIdentity<I>
where
    I: Clone + Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentIdentity<I>>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
