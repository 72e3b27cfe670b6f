//! Blocking client for the accounts service REST API.
//!
//! # Overview
//! Fetches customers, orders, subscriptions, plans, products, payment
//! options and transactions as typed values. Configuration (base URL,
//! timeout, static `Authorization` header) is resolved once into a
//! `ClientConfig`; `AccountsClient` is then stateless and safe to share.
//!
//! # Design
//! - Each operation is `build_*` (plain-data `HttpRequest`) → `Transport`
//!   (one blocking round trip, no retries) → `parse_response` (status
//!   policy + JSON decode).
//! - `get_customer` and `get_customer_orders` treat any non-200 as an
//!   error; every other operation only treats 4xx as an error and decodes
//!   5xx bodies as the success shape.
//! - `Filter` renders `filter[field][op]=value` query fragments.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, AccountsClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ServiceError};
pub use filter::Filter;
pub use http::{HttpRequest, HttpResponse, StatusPolicy};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Amount, Customer, CustomerData, CustomerLoginHistory, Order, OrderQuantity, PaymentOption,
    PaymentOptionDetails, Plan, PlanQuantity, Product, Subscription, Transaction,
};
