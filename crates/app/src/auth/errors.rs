//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Bad signature, malformed token, or expired token.
    #[error("invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// The token verified but carries no usable user identity.
    #[error("token has no user identity")]
    MissingIdentity,

    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
