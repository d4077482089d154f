//! Service Routers

use salvo::Router;

use crate::{auth, carts, gateway, healthcheck, orders, products};

pub(crate) fn products_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::products))
        .push(Router::new().get(products::index::handler))
        .push(Router::with_path("product/{asin}").get(products::get::handler))
        .push(Router::with_path("search").get(products::search::handler))
        .push(Router::with_path("category/{category}").get(products::category::handler))
        .push(Router::with_path("categories").get(products::categories::handler))
}

fn cart_routes() -> Router {
    Router::new()
        .push(Router::new().get(carts::get::handler))
        .push(Router::with_path("add").post(carts::add::handler))
        .push(Router::with_path("update").put(carts::update::handler))
        .push(Router::with_path("remove/{asin}").delete(carts::remove::handler))
        .push(Router::with_path("clear").delete(carts::clear::handler))
        .push(Router::with_path("count").get(carts::count::handler))
}

/// Cart routes answer both under `/api/cart` and at the root, where the
/// gateway delivers them after stripping its prefix.
pub(crate) fn cart_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::cart))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("api/cart").push(cart_routes()))
                .push(cart_routes()),
        )
}

pub(crate) fn orders_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::orders))
        .push(
            Router::new()
                .hoop(auth::middleware::optional)
                .post(orders::create::handler),
        )
        .push(Router::new().get(orders::index::handler))
        .push(Router::with_path("{id}").get(orders::get::handler))
        .push(Router::with_path("{id}/cancel").put(orders::cancel::handler))
}

/// Everything not served locally is proxied.
pub(crate) fn gateway_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::gateway))
        .push(Router::with_path("{**rest}").goal(gateway::handler))
}
