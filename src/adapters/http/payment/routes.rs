//! Axum router configuration for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_checkout, get_order_status, list_client_orders, provider_notify_get,
    provider_notify_post, PaymentAppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// ## Client Endpoints
/// - `POST /checkout` - Create an order and the signed provider redirect
/// - `GET /orders/:order_no` - Poll one order's status
/// - `GET /orders?client_id=` - List a client's orders
///
/// ## Provider Endpoints (no auth, signature verified)
/// - `GET|POST /notify` - Asynchronous payment notification; answers the
///   bare provider token, not JSON
pub fn payment_routes() -> Router<PaymentAppState> {
    Router::new()
        .route("/checkout", post(create_checkout))
        .route("/notify", get(provider_notify_get).post(provider_notify_post))
        .route("/orders", get(list_client_orders))
        .route("/orders/:order_no", get(get_order_status))
}
