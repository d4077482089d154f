//! Request ID resolution.

use salvo::{
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, Response},
};
use tracing::warn;
use uuid::Uuid;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

const DEPOT_KEY: &str = "request_id";

/// Longest inbound id we echo; anything longer is replaced.
const MAX_INBOUND_LEN: usize = 128;

/// Reuse a caller-supplied id when it is sane, otherwise mint a UUIDv7.
pub(super) fn resolve(header_value: Option<String>) -> String {
    header_value
        .map(|value| value.trim().to_string())
        .filter(|value| {
            !value.is_empty()
                && value.len() <= MAX_INBOUND_LEN
                && value.bytes().all(|b| b.is_ascii_graphic())
        })
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn remember(depot: &mut Depot, res: &mut Response, request_id: &str) {
    depot.insert(DEPOT_KEY, request_id.to_string());

    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => warn!(request_id, "unencodable request id: {source}"),
    }
}

/// The id assigned to the current request, if the logging middleware ran.
pub(crate) fn current(depot: &Depot) -> Option<&str> {
    depot.get::<String>(DEPOT_KEY).ok().map(String::as_str)
}

pub(super) fn status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_is_kept() {
        assert_eq!(resolve(Some(" abc-123 ".to_string())), "abc-123");
    }

    #[test]
    fn blank_or_hostile_ids_are_replaced() {
        for value in ["", "   ", "has space", &"x".repeat(200)] {
            let resolved = resolve(Some(value.to_string()));

            assert!(Uuid::parse_str(&resolved).is_ok(), "{value:?} was kept");
        }

        assert!(Uuid::parse_str(&resolve(None)).is_ok(), "missing id not minted");
    }
}
