//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use shopfront_app::auth::UserId;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_user_id(&mut self, user: UserId);

    /// The shopper authenticated for this request, if any.
    fn user_id(&self) -> Option<UserId>;

    fn user_id_or_401(&self) -> Result<UserId, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_user_id(&mut self, user: UserId) {
        self.inject(user);
    }

    fn user_id(&self) -> Option<UserId> {
        self.obtain::<UserId>().ok().cloned()
    }

    fn user_id_or_401(&self) -> Result<UserId, ApiError> {
        self.user_id()
            .ok_or_else(|| ApiError::unauthorized("Access token required"))
    }
}
