//! Typed client for the accounts service.
//!
//! # Design
//! `AccountsClient` holds an immutable `ClientConfig` and a `Transport`,
//! nothing else. Every operation is split the same way: a `build_*` method
//! produces a plain-data `HttpRequest` (URL plus the optional
//! `Authorization` header), the transport performs one blocking round trip,
//! and `parse_response` applies the operation's `StatusPolicy` and decodes
//! the body. The `build_*` half and `parse_response` are public so callers
//! can run the I/O themselves.
//!
//! Path segments and query values supplied as typed arguments (brand, sku,
//! group, aggregate list) are percent-encoded so the URL parses as an
//! `http::Uri`. Raw filter strings and `Filter` output are appended as-is.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, ServiceError};
use crate::filter::Filter;
use crate::http::{HttpRequest, HttpResponse, StatusPolicy, AUTHORIZATION};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Customer, Order, PaymentOption, Plan, Product, Subscription, Transaction};

/// Escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Escaped inside a query-string value.
const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT.add(b'&').add(b'+').add(b'=');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

fn query_value(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}

#[derive(Debug, Clone)]
pub struct AccountsClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl AccountsClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self { config, transport }
    }

    /// Build a client from `ACCOUNTS_SERVICE_*` / `AUTHORIZATION_HEADER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        ClientConfig::from_env().map(Self::new)
    }
}

impl<T> AccountsClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn request(&self, path: &str) -> HttpRequest {
        let headers = match self.config.authorization() {
            Some(value) => vec![(AUTHORIZATION.to_string(), value.to_string())],
            None => Vec::new(),
        };
        HttpRequest {
            url: format!("{}/v1/{path}", self.config.base_url),
            headers,
        }
    }

    pub fn build_get_customer(&self, customer_id: i64) -> HttpRequest {
        self.request(&format!("customers/{customer_id}"))
    }

    pub fn build_get_customer_orders(&self, customer_id: i64) -> HttpRequest {
        self.request(&format!("customers/{customer_id}/orders"))
    }

    pub fn build_get_customer_payment_options(&self, customer_id: i64) -> HttpRequest {
        self.request(&format!("customers/{customer_id}/payment_options"))
    }

    pub fn build_get_customer_transactions(&self, customer_id: i64) -> HttpRequest {
        self.request(&format!("transactions?filter[customer_id][eq]={customer_id}"))
    }

    pub fn build_get_subscription(&self, subscription_id: i64) -> HttpRequest {
        self.request(&format!("subscriptions/{subscription_id}"))
    }

    pub fn build_get_subscription_by_order_plan(&self, order_id: i64, plan_sku: &str) -> HttpRequest {
        self.request(&format!(
            "subscriptions/?filter[order_id][eq]={order_id}&filter[plan_sku][eq]={}",
            query_value(plan_sku)
        ))
    }

    pub fn build_get_order_subscriptions(&self, order_id: i64) -> HttpRequest {
        self.request(&format!("subscriptions?filter[order_id][eq]={order_id}"))
    }

    pub fn build_get_plan(&self, brand_slug: &str, sku: &str) -> HttpRequest {
        self.request(&format!("brands/{}/plans/{}", segment(brand_slug), segment(sku)))
    }

    pub fn build_get_product(&self, brand_slug: &str, sku: &str) -> HttpRequest {
        self.request(&format!("brands/{}/products/{}", segment(brand_slug), segment(sku)))
    }

    pub fn build_get_subscription_orders(&self, subscription_id: i64) -> HttpRequest {
        self.request(&format!("subscriptions/{subscription_id}/orders"))
    }

    pub fn build_get_order(&self, order_id: i64) -> HttpRequest {
        self.request(&format!("orders/{order_id}"))
    }

    /// `filter` is a raw query string appended after `?` unchanged.
    pub fn build_get_payment_options(&self, filter: &str) -> HttpRequest {
        self.request(&format!("payment_options?{filter}"))
    }

    pub fn build_get_payment_option(&self, payment_option_id: i64) -> HttpRequest {
        self.request(&format!("payment_options/{payment_option_id}"))
    }

    /// The aggregate list is sent as a percent-encoded JSON array; the
    /// decoded parameter reads e.g. `["sum(amount)"]`.
    pub fn build_get_transactions_aggregate<S: AsRef<str>>(
        &self,
        filter: &Filter,
        group: &str,
        aggregate: &[S],
    ) -> Result<HttpRequest, ApiError> {
        let aggregate: Vec<&str> = aggregate.iter().map(|item| item.as_ref()).collect();
        let aggregate = serde_json::to_string(&aggregate).map_err(ApiError::Serialization)?;
        Ok(self.request(&format!(
            "transactions?{filter}&group={}&aggregate={}",
            query_value(group),
            query_value(&aggregate)
        )))
    }

    /// `filter` is a raw query string appended after `?` unchanged.
    pub fn build_get_transactions(&self, filter: &str) -> HttpRequest {
        self.request(&format!("transactions?{filter}"))
    }
}

impl<T: Transport> AccountsClient<T> {
    fn fetch<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: HttpRequest,
        policy: StatusPolicy,
    ) -> Result<R, ApiError> {
        debug!(operation, url = %request.url, "accounts service request");
        let response = self.transport.execute(&request)?;
        debug!(operation, status = response.status, "accounts service response");
        parse_response(response, policy)
    }

    /// Fails on any status other than 200.
    pub fn get_customer(&self, customer_id: i64) -> Result<Customer, ApiError> {
        let request = self.build_get_customer(customer_id);
        self.fetch("get_customer", request, StatusPolicy::OkOnly)
    }

    /// Fails on any status other than 200.
    pub fn get_customer_orders(&self, customer_id: i64) -> Result<Vec<Order>, ApiError> {
        let request = self.build_get_customer_orders(customer_id);
        self.fetch("get_customer_orders", request, StatusPolicy::OkOnly)
    }

    pub fn get_customer_payment_options(&self, customer_id: i64) -> Result<Vec<PaymentOption>, ApiError> {
        let request = self.build_get_customer_payment_options(customer_id);
        self.fetch("get_customer_payment_options", request, StatusPolicy::ClientErrors)
    }

    pub fn get_customer_transactions(&self, customer_id: i64) -> Result<Vec<Transaction>, ApiError> {
        let request = self.build_get_customer_transactions(customer_id);
        self.fetch("get_customer_transactions", request, StatusPolicy::ClientErrors)
    }

    pub fn get_subscription(&self, subscription_id: i64) -> Result<Subscription, ApiError> {
        let request = self.build_get_subscription(subscription_id);
        self.fetch("get_subscription", request, StatusPolicy::ClientErrors)
    }

    /// First subscription on `order_id` for `plan_sku`.
    ///
    /// Returns `ApiError::EmptyResult` when the service reports none.
    pub fn get_subscription_by_order_plan(&self, order_id: i64, plan_sku: &str) -> Result<Subscription, ApiError> {
        let request = self.build_get_subscription_by_order_plan(order_id, plan_sku);
        let subscriptions: Vec<Subscription> =
            self.fetch("get_subscription_by_order_plan", request, StatusPolicy::ClientErrors)?;
        subscriptions
            .into_iter()
            .next()
            .ok_or(ApiError::EmptyResult { resource: "subscription" })
    }

    pub fn get_order_subscriptions(&self, order_id: i64) -> Result<Vec<Subscription>, ApiError> {
        let request = self.build_get_order_subscriptions(order_id);
        self.fetch("get_order_subscriptions", request, StatusPolicy::ClientErrors)
    }

    pub fn get_plan(&self, brand_slug: &str, sku: &str) -> Result<Plan, ApiError> {
        let request = self.build_get_plan(brand_slug, sku);
        self.fetch("get_plan", request, StatusPolicy::ClientErrors)
    }

    pub fn get_product(&self, brand_slug: &str, sku: &str) -> Result<Product, ApiError> {
        let request = self.build_get_product(brand_slug, sku);
        self.fetch("get_product", request, StatusPolicy::ClientErrors)
    }

    pub fn get_subscription_orders(&self, subscription_id: i64) -> Result<Vec<Order>, ApiError> {
        let request = self.build_get_subscription_orders(subscription_id);
        self.fetch("get_subscription_orders", request, StatusPolicy::ClientErrors)
    }

    pub fn get_order(&self, order_id: i64) -> Result<Order, ApiError> {
        let request = self.build_get_order(order_id);
        self.fetch("get_order", request, StatusPolicy::ClientErrors)
    }

    /// Not served by the accounts API yet; always empty.
    pub fn get_order_plans(&self, _order_id: i64) -> Result<Vec<Plan>, ApiError> {
        Ok(Vec::new())
    }

    /// Not served by the accounts API yet; always empty.
    pub fn get_order_products(&self, _order_id: i64) -> Result<Vec<Product>, ApiError> {
        Ok(Vec::new())
    }

    pub fn get_payment_options(&self, filter: &str) -> Result<Vec<PaymentOption>, ApiError> {
        let request = self.build_get_payment_options(filter);
        self.fetch("get_payment_options", request, StatusPolicy::ClientErrors)
    }

    pub fn get_payment_option(&self, payment_option_id: i64) -> Result<PaymentOption, ApiError> {
        let request = self.build_get_payment_option(payment_option_id);
        self.fetch("get_payment_option", request, StatusPolicy::ClientErrors)
    }

    /// Grouped aggregates over transactions. The result shape depends on
    /// the query, so it is left as an open JSON object.
    pub fn get_transactions_aggregate<S: AsRef<str>>(
        &self,
        filter: &Filter,
        group: &str,
        aggregate: &[S],
    ) -> Result<Map<String, Value>, ApiError> {
        let request = self.build_get_transactions_aggregate(filter, group, aggregate)?;
        self.fetch("get_transactions_aggregate", request, StatusPolicy::ClientErrors)
    }

    pub fn get_transactions(&self, filter: &str) -> Result<Vec<Transaction>, ApiError> {
        let request = self.build_get_transactions(filter);
        self.fetch("get_transactions", request, StatusPolicy::ClientErrors)
    }
}

/// Apply `policy` to `response` and decode the body.
///
/// On an error status the body is decoded as `ServiceError`. If that decode
/// fails it is logged and an empty `ServiceError` is returned, so an error
/// status always yields `ApiError::Service`. Any other status is decoded as
/// `R`.
pub fn parse_response<R: DeserializeOwned>(
    response: HttpResponse,
    policy: StatusPolicy,
) -> Result<R, ApiError> {
    if policy.is_error(response.status) {
        return Err(ApiError::Service(decode_service_error(&response)));
    }
    serde_json::from_str(&response.body).map_err(|err| {
        warn!(status = response.status, error = %err, "unable to decode response body");
        ApiError::Deserialization(err)
    })
}

fn decode_service_error(response: &HttpResponse) -> ServiceError {
    serde_json::from_str(&response.body).unwrap_or_else(|err| {
        warn!(status = response.status, error = %err, "unable to decode error response body");
        ServiceError::default()
    })
}
