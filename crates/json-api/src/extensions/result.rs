//! Result helper extensions for HTTP handlers.

use std::{borrow::Cow, fmt::Display};

use tracing::error;

use crate::errors::ApiError;

/// Map any error to an HTTP error.
pub(crate) trait ResultExt<T> {
    /// Logged internal server error.
    fn or_500(self, context: &str) -> Result<T, ApiError>;

    /// Client error carrying `message`.
    fn or_400(self, message: impl Into<Cow<'static, str>>) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{context}: {error}");

            ApiError::internal().with_detail(error)
        })
    }

    fn or_400(self, message: impl Into<Cow<'static, str>>) -> Result<T, ApiError> {
        self.map_err(|_ignored| ApiError::bad_request(message))
    }
}
