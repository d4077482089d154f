//! JSON error responses.

use std::{
    borrow::Cow,
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

use salvo::{
    Scribe,
    http::StatusCode,
    oapi::{Components, EndpointOutRegister, Operation},
    prelude::{Json, Response},
};
use serde::{Deserialize, Serialize};

static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Echo internal failure details in error bodies.
pub(crate) fn set_expose_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

fn expose_details() -> bool {
    EXPOSE_DETAILS.load(Ordering::Relaxed)
}

/// Wire shape of every error body.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An HTTP error rendered as `{"message": ..., "error"?: ...}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: Cow<'static, str>,
    pub(crate) detail: Option<String>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub(crate) fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Upstream failure; the description is always included.
    pub(crate) fn bad_gateway(error: impl Display) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: Cow::Borrowed("Proxy error"),
            detail: Some(error.to_string()),
        }
    }

    /// Attach an internal failure description, shown only when details are exposed.
    #[must_use]
    pub(crate) fn with_detail(mut self, error: impl Display) -> Self {
        if expose_details() {
            self.detail = Some(error.to_string());
        }

        self
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ErrorBody {
            message: self.message.into_owned(),
            error: self.detail,
        }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut Components, _operation: &mut Operation) {}
}
