//! JWT authentication for axum applications.
//!
//! Provides a login endpoint that exchanges credentials for a signed
//! token, and a guard middleware that verifies tokens on protected routes
//! and exposes the authenticated identity to handlers. Verification is
//! stateless: there is no session store, only the token's signature and
//! expiry.
//!
//! The host supplies an [`IdentityStore`] that knows how to verify
//! credentials and re-load an identity from a token subject; everything
//! else has defaults.
//!
//! # Examples
//!
//! ```no_run
//! use std::convert::Infallible;
//!
//! use async_trait::async_trait;
//! use axum::routing::get;
//! use axum::Router;
//! use jwt_axum::{AuthConfig, CurrentIdentity, Identity, IdentityStore, JwtAuth};
//!
//! #[derive(Clone)]
//! struct User {
//!     id: u64,
//! }
//!
//! impl Identity for User {
//!     fn id(&self) -> serde_json::Value {
//!         serde_json::json!(self.id)
//!     }
//! }
//!
//! struct SingleUser;
//!
//! #[async_trait]
//! impl IdentityStore for SingleUser {
//!     type Identity = User;
//!     type Error = Infallible;
//!
//!     async fn lookup(&self, username: &str, password: &str) -> Result<Option<User>, Infallible> {
//!         Ok((username == "joe" && password == "pass").then(|| User { id: 1 }))
//!     }
//!
//!     async fn load(&self, subject: &serde_json::Value) -> Result<Option<User>, Infallible> {
//!         Ok((*subject == serde_json::json!(1)).then(|| User { id: 1 }))
//!     }
//! }
//!
//! async fn whoami(CurrentIdentity(user): CurrentIdentity<User>) -> String {
//!     format!("user {}", user.id)
//! }
//!
//! # fn build() -> Router {
//! let auth = JwtAuth::new(AuthConfig::new("secret_key_at_least_32_bytes_long!"), SingleUser);
//! let protected = auth.protect(Router::new().route("/whoami", get(whoami)));
//! auth.routes().merge(protected)
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod handler;
pub mod identity;
pub mod mapper;

// Re-export commonly used items
pub use auth::AuthState;
pub use auth::JwtAuth;
pub use config::AuthConfig;
pub use error::AuthError;
pub use identity::CurrentIdentity;
pub use identity::Identity;
pub use identity::IdentityStore;
pub use jwt_core::Algorithm;
pub use jwt_core::Claims;
pub use jwt_core::DecodingKey;
pub use jwt_core::EncodingKey;
pub use jwt_core::TokenCodec;
pub use jwt_core::TokenError;
