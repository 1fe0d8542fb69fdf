use axum::http::StatusCode;
use jwt_core::ClaimsError;
use jwt_core::TokenError;
use thiserror::Error;

/// Every failure the authentication pipeline can produce.
///
/// All variants are terminal: they map to HTTP responses through the
/// error mapper and never abort the process. The `#[error]` text is the
/// client-facing `description` field.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login body lacked `username` or `password`.
    #[error("Missing required credentials")]
    MissingCredentials,

    /// Credential lookup recognized no user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization` header on a protected route.
    #[error("Authorization header was missing")]
    AuthHeaderMissing,

    /// The header's scheme is not the configured one.
    #[error("Unsupported authorization type")]
    UnsupportedScheme,

    /// Scheme present but nothing followed it.
    #[error("Token missing")]
    TokenMissing,

    /// More than two whitespace-separated parts in the header.
    #[error("Token contains spaces")]
    TokenMalformed,

    /// Codec-level failure: structure, signature or expiry.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Token verified but the identity loader found no user.
    #[error("User does not exist")]
    UserNotFound,

    /// A claims hook tried to override a codec-owned key. A programming
    /// error in the host, not a client fault.
    #[error(transparent)]
    ClaimsConflict(#[from] ClaimsError),
}

impl AuthError {
    /// HTTP status the default mapper pairs with this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthHeaderMissing => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::FORBIDDEN,
            Self::Token(TokenError::Encoding(_)) | Self::ClaimsConflict(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Short error label for the response body's `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Bad Request",
            Self::InvalidCredentials => "Forbidden",
            Self::AuthHeaderMissing => "Authorization Required",
            Self::UnsupportedScheme | Self::TokenMissing | Self::TokenMalformed => {
                "Invalid JWT header"
            }
            Self::Token(TokenError::Encoding(_)) | Self::ClaimsConflict(_) => {
                "Internal Server Error"
            }
            Self::Token(_) | Self::UserNotFound => "Invalid JWT",
        }
    }
}
