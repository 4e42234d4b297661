//! Order aggregate and its lifecycle.
//!
//! One order is one checkout attempt: created `pending`, moved to `paid` by
//! exactly one verified provider notification, and to `analyzed` by exactly
//! one analysis consumption. Transitions are forward-only and never skip a
//! state.

mod aggregate;
mod errors;
mod order_no;
mod pay_method;
mod status;

pub use aggregate::Order;
pub use errors::OrderError;
pub use order_no::OrderNoGenerator;
pub use pay_method::PayMethod;
pub use status::OrderStatus;
