//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use shopfront_app::{
    auth::{AuthService, MockAuthService, UserId},
    context::{CartContext, OrdersContext, ProductsContext},
    domain::{
        carts::MockCartsService, orders::MockOrdersService, products::MockProductsService,
    },
};

use crate::extensions::*;

pub(crate) const TEST_USER_ID: &str = "42";

pub(crate) const GUEST_USER_ID: &str = "1";

pub(crate) fn test_user() -> UserId {
    UserId::new(TEST_USER_ID)
}

/// Authenticate every request as [`TEST_USER_ID`].
#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_id(test_user());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> Arc<dyn AuthService> {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    Arc::new(auth)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    let ctx = Arc::new(ProductsContext {
        products: Arc::new(products),
    });

    Service::new(Router::new().hoop(inject(ctx)).push(route))
}

pub(crate) fn cart_service(carts: MockCartsService, route: Router) -> Service {
    let ctx = Arc::new(CartContext {
        carts: Arc::new(carts),
        auth: strict_auth_mock(),
    });

    Service::new(
        Router::new()
            .hoop(inject(ctx))
            .hoop(inject_user)
            .push(route),
    )
}

fn orders_context(orders: MockOrdersService) -> Arc<OrdersContext> {
    Arc::new(OrdersContext {
        orders: Arc::new(orders),
        auth: strict_auth_mock(),
        guest_user: UserId::new(GUEST_USER_ID),
    })
}

/// Orders routes with an authenticated shopper.
pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(orders_context(orders)))
            .hoop(inject_user)
            .push(route),
    )
}

/// Orders routes without any shopper in the depot.
pub(crate) fn anonymous_orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(orders_context(orders)))
            .push(route),
    )
}
