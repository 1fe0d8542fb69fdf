use thiserror::Error;

/// Error type for token encode/verify operations.
///
/// `Malformed` and `BadSignature` deliberately share the same display
/// text: a client is told only that the token is undecipherable, not
/// which verification step rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A claim value could not be serialized into the payload.
    #[error("Failed to encode token: {0}")]
    Encoding(String),

    /// The token does not have the three-segment compact structure.
    #[error("Token is undecipherable")]
    Malformed,

    /// The signature does not match the header and payload.
    #[error("Token is undecipherable")]
    BadSignature,

    /// The token is past its `expires-at` claim.
    #[error("Token is expired")]
    Expired,
}

/// Error type for claims construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    /// A claims hook tried to set a codec-managed key.
    #[error("claim key `{0}` is reserved")]
    ReservedKey(String),
}
