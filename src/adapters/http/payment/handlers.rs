//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers. The notify endpoint answers the bare provider token; every
//! other endpoint speaks JSON.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Form, Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    CreateCheckoutCommand, CreateCheckoutHandler, GetOrderStatusHandler, GetOrderStatusQuery,
    HandleProviderNotifyCommand, HandleProviderNotifyHandler,
};
use crate::config::PaymentConfig;
use crate::domain::foundation::ClientId;
use crate::domain::order::OrderError;
use crate::domain::payment::{FAIL_TOKEN, SUCCESS_TOKEN};
use crate::ports::OrderStore;

use super::super::error::ApiError;
use super::dto::{
    CheckoutResponse, ClientOrdersQuery, ClientOrdersResponse, CreateCheckoutRequest,
    OrderStatusResponse, OrderSummaryResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the payment module.
///
/// Cloned per request; dependencies are Arc-wrapped ports plus the
/// explicitly constructed payment configuration.
#[derive(Clone)]
pub struct PaymentAppState {
    pub order_store: Arc<dyn OrderStore>,
    pub payment: PaymentConfig,
}

impl PaymentAppState {
    /// Create handlers on demand from the shared state.
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.order_store.clone(), self.payment.clone())
    }

    pub fn notify_handler(&self) -> HandleProviderNotifyHandler {
        HandleProviderNotifyHandler::new(self.order_store.clone(), self.payment.clone())
    }

    pub fn order_status_handler(&self) -> GetOrderStatusHandler {
        GetOrderStatusHandler::new(self.order_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payment/checkout - Create an order and the provider redirect
pub async fn create_checkout(
    State(state): State<PaymentAppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_checkout_handler();
    let cmd = CreateCheckoutCommand {
        client_id: request.client_id,
        pay_method: request.pay_method,
    };

    let result = handler.handle(cmd).await?;

    let response = CheckoutResponse {
        success: true,
        url: result.redirect_url,
        order_no: result.order_no,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/payment/notify - Provider notification via query parameters
pub async fn provider_notify_get(
    State(state): State<PaymentAppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    acknowledge(&state, params).await
}

/// POST /api/payment/notify - Provider notification via form body
pub async fn provider_notify_post(
    State(state): State<PaymentAppState>,
    Form(params): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    acknowledge(&state, params).await
}

/// Runs the notify handler and maps the outcome to the provider's
/// plain-text acknowledgment contract: every handled-or-harmless outcome
/// answers the success token so the provider stops redelivering; rejected
/// input answers the failure token with a matching status code.
async fn acknowledge(
    state: &PaymentAppState,
    params: HashMap<String, String>,
) -> (StatusCode, &'static str) {
    let handler = state.notify_handler();
    match handler.handle(HandleProviderNotifyCommand { params }).await {
        Ok(_) => (StatusCode::OK, SUCCESS_TOKEN),
        Err(err) => {
            let status = match &err {
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::SignatureMismatch
                | OrderError::AmountMismatch { .. }
                | OrderError::Validation { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, FAIL_TOKEN)
        }
    }
}

/// GET /api/payment/orders/:order_no - Poll one order's status
pub async fn get_order_status(
    State(state): State<PaymentAppState>,
    Path(order_no): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.order_status_handler();
    let view = handler.handle(GetOrderStatusQuery { order_no }).await?;

    Ok(Json(OrderStatusResponse::from(view)))
}

/// GET /api/payment/orders?client_id= - List a client's orders
pub async fn list_client_orders(
    State(state): State<PaymentAppState>,
    Query(query): Query<ClientOrdersQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let client_id = ClientId::new(query.client_id)
        .map_err(|e| OrderError::validation("client_id", e.to_string()))?;

    let orders = state
        .order_store
        .find_by_client(&client_id)
        .await
        .map_err(OrderError::from)?;

    let response = ClientOrdersResponse {
        success: true,
        orders: orders.into_iter().map(OrderSummaryResponse::from).collect(),
    };

    Ok(Json(response))
}
