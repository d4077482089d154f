//! API Gateway
//!
//! Forwards `/api/*` traffic to the owning service by longest path prefix.

mod proxy;
mod routes;

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub(crate) use proxy::handler;
use routes::RouteTable;

#[derive(Debug, Error)]
pub(crate) enum GatewayInitError {
    #[error("failed to build upstream HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Shared proxy state: the route table and one pooled HTTP client.
#[derive(Debug, Clone)]
pub(crate) struct Gateway {
    routes: RouteTable,
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Gateway {
    pub(crate) fn new(
        upstreams: Vec<(&'static str, Url)>,
        timeout: Option<Duration>,
        max_body_bytes: usize,
    ) -> Result<Self, GatewayInitError> {
        // Upstream redirects go back to the client as they are.
        let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(GatewayInitError::Client)?;

        Ok(Self {
            routes: RouteTable::new(upstreams),
            client,
            max_body_bytes,
        })
    }
}
