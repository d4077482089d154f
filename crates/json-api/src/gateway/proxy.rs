//! Reverse proxy handler.

use std::sync::Arc;

use salvo::{
    http::{
        HeaderMap, HeaderValue,
        header::{CONTENT_LENGTH, CONTENT_TYPE, HOST},
    },
    prelude::*,
};
use tracing::{debug, warn};

use crate::{
    errors::ApiError,
    extensions::*,
    gateway::Gateway,
    observability::{
        metrics::{self, UpstreamOutcome},
        request_ids::{self, REQUEST_ID_HEADER},
    },
};

/// Prefix whose JSON bodies are parsed and re-encoded before forwarding.
const REENCODE_JSON_PREFIX: &str = "/api/orders";

/// Headers that describe a single connection and never cross the proxy.
fn is_hop_by_hop(name: &str) -> bool {
    matches!(
        name,
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

fn upstream_headers(req: &Request, request_id: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(req.headers().len());

    for (name, value) in req.headers() {
        if *name == HOST || *name == CONTENT_LENGTH || is_hop_by_hop(name.as_str()) {
            continue;
        }

        headers.append(name.clone(), value.clone());
    }

    if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    headers
}

/// Forward the request to its upstream and stream the answer back.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if let Err(error) = forward(req, depot, res).await {
        res.render(error);
    }
}

async fn forward(req: &mut Request, depot: &Depot, res: &mut Response) -> Result<(), ApiError> {
    let gateway = depot.obtain_or_500::<Arc<Gateway>>()?;

    let Some(resolved) = gateway
        .routes
        .resolve(req.uri().path(), req.uri().query())
    else {
        return Err(ApiError::not_found("Not found"));
    };

    let mut headers = upstream_headers(req, request_ids::current(depot));

    let mut body = req
        .payload_with_max_size(gateway.max_body_bytes)
        .await
        .map_err(|error| {
            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").with_detail(error)
        })?
        .clone();

    if resolved.prefix == REENCODE_JSON_PREFIX && !body.is_empty() && is_json(&headers) {
        let value: serde_json::Value =
            serde_json::from_slice(&body).or_400("Invalid JSON body")?;

        body = serde_json::to_vec(&value)
            .or_500("failed to re-encode order body")?
            .into();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    debug!(
        method = %req.method(),
        prefix = resolved.prefix,
        upstream = %resolved.url,
        "proxying request"
    );

    let upstream = gateway
        .client
        .request(req.method().clone(), resolved.url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|error| {
            warn!(prefix = resolved.prefix, "upstream request failed: {error}");
            metrics::observe_upstream(resolved.prefix, UpstreamOutcome::Failed);

            ApiError::bad_gateway(error)
        })?;

    metrics::observe_upstream(resolved.prefix, UpstreamOutcome::Answered);

    res.status_code(upstream.status());

    for (name, value) in upstream.headers() {
        if !is_hop_by_hop(name.as_str()) {
            res.headers_mut().append(name.clone(), value.clone());
        }
    }

    res.stream(upstream.bytes_stream());

    Ok(())
}
