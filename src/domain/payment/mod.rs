//! Payment provider protocol types.
//!
//! The signature codec and the parsed asynchronous notification. Both are
//! pure; transport and persistence stay in the adapters.

mod notify;
pub mod signature;

pub use notify::{ProviderNotify, FAIL_TOKEN, SUCCESS_TOKEN, TRADE_SUCCESS};
