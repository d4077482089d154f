//! Shopfront JSON API Server
//!
//! One binary, four services: the gateway, the product catalog, carts and
//! orders. The subcommand picks which one this process runs.

use std::{process::ExitCode, sync::Arc};

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use thiserror::Error;
use tracing::{error, info};

use shopfront_app::{
    auth::{AuthService, UserId},
    context::{AppInitError, CartContext, OrdersContext, ProductsContext},
};

use crate::{
    config::{ServerConfig, ServiceCommand},
    gateway::{Gateway, GatewayInitError},
    observability::{Observability, ObservabilityError, metrics_handler, request_logging},
};

mod auth;
mod carts;
mod config;
mod errors;
mod extensions;
mod gateway;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to initialise observability: {0}")]
    Observability(#[from] ObservabilityError),

    #[error("failed to initialise service: {0}")]
    App(#[from] AppInitError),

    #[error("failed to initialise gateway: {0}")]
    Gateway(#[from] GatewayInitError),
}

/// Wire the selected service's handles into its router.
async fn service_router(service: &ServiceCommand) -> Result<Router, StartupError> {
    let router = match service {
        ServiceCommand::Products(products) => {
            let ctx = ProductsContext::connect(
                &products.database.settings(),
                products.cache.settings().as_ref(),
            )
            .await?;

            Router::new()
                .hoop(inject(Arc::new(ctx)))
                .push(router::products_router())
        }
        ServiceCommand::Cart(cart) => {
            let ctx = CartContext::connect(&cart.cache.settings_or_default(), &cart.auth.jwt_secret)?;
            let auth: Arc<dyn AuthService> = ctx.auth.clone();

            Router::new()
                .hoop(inject(Arc::new(ctx)))
                .hoop(inject(auth))
                .push(router::cart_router())
        }
        ServiceCommand::Orders(orders) => {
            let ctx = OrdersContext::connect(
                &orders.database.settings(),
                &orders.auth.jwt_secret,
                UserId::new(orders.guest_user_id.clone()),
            )
            .await?;
            let auth: Arc<dyn AuthService> = ctx.auth.clone();

            Router::new()
                .hoop(inject(Arc::new(ctx)))
                .hoop(inject(auth))
                .push(router::orders_router())
        }
        ServiceCommand::Gateway(gateway) => {
            let gateway = Gateway::new(
                gateway.upstreams(),
                gateway.upstream_timeout(),
                gateway.max_body_bytes,
            )?;

            Router::new()
                .hoop(inject(Arc::new(gateway)))
                .push(router::gateway_router())
        }
    };

    Ok(router)
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let service_name = config.service.service_name();
    let addr = config.socket_addr();

    let service = service_router(&config.service).await?;

    let doc = OpenApi::new("Shopfront API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&service);

    let mut router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(request_logging);

    // The gateway forwards paths verbatim.
    if !matches!(config.service, ServiceCommand::Gateway(_)) {
        router = router.hoop(remove_slash());
    }

    let router = router
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
        .push(service);

    info!(service = service_name, %addr, "starting server");

    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;

    info!(service = service_name, "server stopped");

    Ok(())
}

/// Shopfront JSON API Server entry point
#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::load() {
        Ok(config) => config,
        // Also covers --help and --version, which clap reports as errors.
        Err(error) => {
            _ = error.print();

            return if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "tracing subscriber failed to install, nothing else can report this"
            )]
            {
                eprintln!("{}", StartupError::from(init_error));
            }

            return ExitCode::FAILURE;
        }
    };

    errors::set_expose_details(config.server.expose_error_details);

    let result = run(config).await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(startup_error) => {
            error!("{startup_error}");

            ExitCode::FAILURE
        }
    };

    observability.shutdown();

    code
}
