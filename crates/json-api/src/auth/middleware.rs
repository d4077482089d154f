//! Bearer auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::debug;

use shopfront_app::auth::AuthService;

use crate::{errors::ApiError, extensions::*};

/// Require a valid bearer token and record its shopper in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized("Access token required"));
        ctrl.skip_rest();

        return;
    };

    if let Err(error) = authenticate(token, depot).await {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// Like [`handler`], but a request without any credential passes through
/// anonymously. A credential that is present must still verify.
#[salvo::handler]
pub(crate) async fn optional(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.headers().get(AUTHORIZATION).is_none() {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized("Access token required"));
        ctrl.skip_rest();

        return;
    };

    if let Err(error) = authenticate(token, depot).await {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

async fn authenticate(token: &str, depot: &mut Depot) -> Result<(), ApiError> {
    let auth = depot.obtain_or_500::<Arc<dyn AuthService>>()?.clone();

    let user = auth.authenticate_bearer(token).await.map_err(|error| {
        debug!("rejected bearer token: {error}");

        ApiError::forbidden("Invalid or expired token")
    })?;

    depot.insert_user_id(user);

    Ok(())
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
