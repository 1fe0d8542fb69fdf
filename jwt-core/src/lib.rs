//! Token issuing and verification primitives.
//!
//! This crate carries the claims model and the codec that signs and
//! verifies compact tokens. It knows nothing about HTTP; the web
//! integration lives in `jwt-axum`.
//!
//! # Examples
//!
//! ```
//! use jwt_core::{Claims, TokenCodec};
//!
//! let codec = TokenCodec::from_secret(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::issue(serde_json::json!("user123"), 300);
//! let token = codec.encode(&claims).unwrap();
//! let decoded = codec.decode(&token).unwrap();
//! assert_eq!(decoded.identity, serde_json::json!("user123"));
//! ```

pub mod claims;
pub mod codec;
pub mod errors;

// Re-export commonly used items
pub use claims::Claims;
pub use claims::RESERVED_KEYS;
pub use codec::TokenCodec;
pub use errors::ClaimsError;
pub use errors::TokenError;

// Key material types hosts need for non-default algorithms
pub use jsonwebtoken::Algorithm;
pub use jsonwebtoken::DecodingKey;
pub use jsonwebtoken::EncodingKey;
