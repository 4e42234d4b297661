//! Snap Insight - Checkout and Paid Image Analysis Backend
//!
//! This crate issues signed payment-provider redirect links, verifies the
//! provider's asynchronous payment webhook, and gates a single paid AI
//! image-analysis call behind verified payment state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
