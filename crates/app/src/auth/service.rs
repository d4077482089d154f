//! Auth service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockall::automock;

use crate::auth::{AuthServiceError, ClaimedUserId, Claims, UserId};

/// Verifies and issues HS256 tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtAuthService {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl Debug for JwtAuthService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("JwtAuthService")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl JwtAuthService {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        // Tokens without `exp` are accepted; `exp` is still checked when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `user`, expiring after `ttl` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be signed.
    pub fn issue_token(
        &self,
        user: &UserId,
        email: Option<String>,
        ttl: Option<Duration>,
    ) -> Result<String, AuthServiceError> {
        let now = Timestamp::now().as_second();

        let exp = ttl
            .and_then(|ttl| i64::try_from(ttl.as_secs()).ok())
            .map(|secs| now.saturating_add(secs));

        let claims = Claims {
            user_id: ClaimedUserId::from(user),
            email,
            iat: Some(now),
            exp,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(AuthServiceError::Signing)
    }

    fn verify(&self, bearer_token: &str) -> Result<UserId, AuthServiceError> {
        let data = decode::<Claims>(bearer_token, &self.decoding, &self.validation)
            .map_err(AuthServiceError::InvalidToken)?;

        data.claims
            .user_id
            .into_user_id()
            .ok_or(AuthServiceError::MissingIdentity)
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError> {
        self.verify(bearer_token)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer credential into the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserId, AuthServiceError>;
}
