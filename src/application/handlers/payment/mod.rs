//! Payment handlers: checkout creation, provider notification, status poll.

mod create_checkout;
mod get_order_status;
mod handle_provider_notify;

pub use create_checkout::{CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult};
pub use get_order_status::{GetOrderStatusHandler, GetOrderStatusQuery, OrderStatusView};
pub use handle_provider_notify::{
    HandleProviderNotifyCommand, HandleProviderNotifyHandler, NotifyOutcome,
};
