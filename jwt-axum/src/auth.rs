use std::collections::HashMap;
use std::sync::Arc;

use axum::middleware;
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use jwt_core::Claims;
use jwt_core::TokenCodec;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::require_jwt;
use crate::handler::login;
use crate::identity::Identity;
use crate::identity::IdentityStore;
use crate::mapper::default_error_mapper;

type ClaimsHook<I> = dyn Fn(&I) -> HashMap<String, serde_json::Value> + Send + Sync;
type MapErrorFn = dyn Fn(&AuthError) -> Response + Send + Sync;

/// Shared state behind the login handler and the guard.
///
/// Built once at startup; every field is read-only afterwards, so cloning
/// per request is cheap and safe under concurrent handling.
pub struct AuthState<S: IdentityStore> {
    pub(crate) store: Arc<S>,
    pub(crate) codec: Arc<TokenCodec>,
    pub(crate) config: Arc<AuthConfig>,
    pub(crate) claims_hook: Option<Arc<ClaimsHook<S::Identity>>>,
    pub(crate) map_error: Arc<MapErrorFn>,
}

// Derived Clone would demand S: Clone; the fields are all Arcs.
impl<S: IdentityStore> Clone for AuthState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            codec: Arc::clone(&self.codec),
            config: Arc::clone(&self.config),
            claims_hook: self.claims_hook.clone(),
            map_error: Arc::clone(&self.map_error),
        }
    }
}

impl<S: IdentityStore> AuthState<S> {
    /// Map an identity to its claims payload: defaults first, then the
    /// optional augmentation hook. A reserved key from the hook is a host
    /// programming error.
    pub(crate) fn build_claims(&self, identity: &S::Identity) -> Result<Claims, AuthError> {
        let mut claims = Claims::issue(identity.id(), self.config.lifetime_seconds);

        if let Some(hook) = &self.claims_hook {
            for (key, value) in hook(identity) {
                claims.merge_extra(key, value)?;
            }
        }

        Ok(claims)
    }

    pub(crate) fn fail(&self, error: &AuthError) -> Response {
        (self.map_error)(error)
    }
}

/// JWT authentication for an axum application.
///
/// Construct with a configuration and a host [`IdentityStore`], then mount
/// [`JwtAuth::routes`] (the login endpoint) and wrap protected routers
/// with [`JwtAuth::protect`].
pub struct JwtAuth<S: IdentityStore> {
    state: AuthState<S>,
}

impl<S: IdentityStore> JwtAuth<S> {
    /// # Panics
    /// Panics on a non-positive token lifetime; `AuthConfig::load` already
    /// rejects one, this catches configs built programmatically.
    pub fn new(config: AuthConfig, store: S) -> Self {
        assert!(
            config.lifetime_seconds > 0,
            "token lifetime must be positive"
        );

        let codec = TokenCodec::from_secret(config.secret.as_bytes())
            .with_algorithm(config.algorithm)
            .with_leeway(config.leeway_seconds);

        let scheme = config.scheme.clone();
        let realm = config.realm.clone();
        let map_error: Arc<MapErrorFn> =
            Arc::new(move |error| default_error_mapper(error, &scheme, &realm));

        Self {
            state: AuthState {
                store: Arc::new(store),
                codec: Arc::new(codec),
                config: Arc::new(config),
                claims_hook: None,
                map_error,
            },
        }
    }

    /// Replace the codec built from the configured secret, e.g. with one
    /// carrying an asymmetric key pair ([`TokenCodec::from_keys`]).
    pub fn with_codec(mut self, codec: TokenCodec) -> Self {
        self.state.codec = Arc::new(codec);
        self
    }

    /// Merge extra claims into every issued token. Keys colliding with the
    /// codec-owned ones are rejected at issue time.
    pub fn with_claims_hook(
        mut self,
        hook: impl Fn(&S::Identity) -> HashMap<String, serde_json::Value> + Send + Sync + 'static,
    ) -> Self {
        self.state.claims_hook = Some(Arc::new(hook));
        self
    }

    /// Replace the default error mapper. The override's response is used
    /// verbatim; no default headers are added.
    pub fn with_error_mapper(
        mut self,
        mapper: impl Fn(&AuthError) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.state.map_error = Arc::new(mapper);
        self
    }

    /// Router exposing `POST <auth_path>`.
    pub fn routes(&self) -> Router {
        Router::new()
            .route(&self.state.config.auth_path, post(login::<S>))
            .with_state(self.state.clone())
    }

    /// Require a verified token on every route of `router`.
    pub fn protect(&self, router: Router) -> Router {
        router.route_layer(middleware::from_fn_with_state(
            self.state.clone(),
            require_jwt::<S>,
        ))
    }
}
