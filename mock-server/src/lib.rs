//! In-memory stand-in for the accounts service.
//!
//! Serves the read-only `/v1` surface the client uses from a seeded store
//! of JSON records. Records are kept as `serde_json::Value` so this crate
//! stays independent from the client's DTOs; the client's integration tests
//! catch any drift between the two.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

mod seed;

pub use axum::Router;
pub use seed::seeded;

/// Records per collection, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub customers: Vec<Value>,
    pub payment_options: Vec<Value>,
    pub orders: Vec<Value>,
    pub subscriptions: Vec<Value>,
    pub transactions: Vec<Value>,
    pub plans: Vec<Value>,
    pub products: Vec<Value>,
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    authorization: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, ApiError>;

/// Router over the seeded store, without an authorization check.
pub fn app() -> Router {
    app_with(seeded(), None)
}

/// Router over `store`. When `authorization` is set, every request must
/// carry exactly that `Authorization` value.
pub fn app_with(store: Store, authorization: Option<String>) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        authorization,
    };
    Router::new()
        .route("/v1/customers/{id}", get(get_customer))
        .route("/v1/customers/{id}/orders", get(customer_orders))
        .route("/v1/customers/{id}/payment_options", get(customer_payment_options))
        .route("/v1/orders/{id}", get(get_order))
        .route("/v1/subscriptions", get(list_subscriptions))
        .route("/v1/subscriptions/", get(list_subscriptions))
        .route("/v1/subscriptions/{id}", get(get_subscription))
        .route("/v1/subscriptions/{id}/orders", get(subscription_orders))
        .route("/v1/payment_options", get(list_payment_options))
        .route("/v1/payment_options/{id}", get(get_payment_option))
        .route("/v1/transactions", get(list_transactions))
        .route("/v1/brands/{brand}/plans/{sku}", get(get_plan))
        .route("/v1/brands/{brand}/products/{sku}", get(get_product))
        .layer(middleware::from_fn_with_state(state.clone(), require_authorization))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

fn error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(json!({ "error": code, "message": message.into() })),
    )
}

fn not_found(resource: &str, key: impl std::fmt::Display) -> ApiError {
    error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("{resource} {key} not found"),
    )
}

async fn require_authorization(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(expected) = &state.authorization {
        let given = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        if given != Some(expected.as_str()) {
            return error(
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Missing or invalid authorization",
            )
            .into_response();
        }
    }
    next.run(request).await
}

/// Compare a record field against a query-string value.
fn field_matches(record: &Value, field: &str, expected: &str) -> bool {
    match record.get(field) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => expected == "null",
        Some(other) => other.to_string() == expected,
    }
}

fn find_by_id<'a>(records: &'a [Value], id: i64) -> Option<&'a Value> {
    records.iter().find(|record| record["id"] == id)
}

fn select(records: &[Value], field: &str, value: impl std::fmt::Display) -> Vec<Value> {
    let value = value.to_string();
    records
        .iter()
        .filter(|record| field_matches(record, field, &value))
        .cloned()
        .collect()
}

/// Parsed `filter[field][eq]=value`, `group` and `aggregate` parameters.
#[derive(Debug, Default)]
struct ListQuery {
    filters: Vec<(String, String)>,
    group: Option<String>,
    aggregate: Option<Vec<String>>,
}

impl ListQuery {
    fn parse(params: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut query = ListQuery::default();
        for (key, value) in params {
            if let Some(inner) = key.strip_prefix("filter[").and_then(|s| s.strip_suffix(']')) {
                let (field, operator) = inner.split_once("][").ok_or_else(|| {
                    error(StatusCode::BAD_REQUEST, "invalid_filter", format!("malformed filter {key}"))
                })?;
                if operator != "eq" {
                    return Err(error(
                        StatusCode::BAD_REQUEST,
                        "invalid_filter",
                        format!("unsupported operator {operator}"),
                    ));
                }
                query.filters.push((field.to_string(), value));
            } else if key == "group" {
                query.group = Some(value);
            } else if key == "aggregate" {
                let list = serde_json::from_str(&value).map_err(|_| {
                    error(StatusCode::BAD_REQUEST, "invalid_aggregate", "aggregate must be a JSON array of strings")
                })?;
                query.aggregate = Some(list);
            }
        }
        Ok(query)
    }

    fn apply(&self, records: &[Value]) -> Vec<Value> {
        records
            .iter()
            .filter(|record| {
                self.filters
                    .iter()
                    .all(|(field, value)| field_matches(record, field, value))
            })
            .cloned()
            .collect()
    }
}

/// Group `records` by `group` and evaluate `sum(field)` / `count(*)` per group.
fn aggregate(records: &[Value], group: &str, functions: &[String]) -> Result<Value, ApiError> {
    let mut groups: BTreeMap<String, Vec<&Value>> = BTreeMap::new();
    for record in records {
        let key = match record.get(group) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "null".to_string(),
        };
        groups.entry(key).or_default().push(record);
    }

    let mut result = Map::new();
    for (key, members) in groups {
        let mut row = Map::new();
        for function in functions {
            let value = if function == "count(*)" {
                json!(members.len())
            } else if let Some(field) = function.strip_prefix("sum(").and_then(|s| s.strip_suffix(')')) {
                let mut total = Decimal::ZERO;
                for member in &members {
                    total += decimal_field(member, field)?;
                }
                json!(total.to_string())
            } else {
                return Err(error(
                    StatusCode::BAD_REQUEST,
                    "invalid_aggregate",
                    format!("unsupported aggregate {function}"),
                ));
            };
            row.insert(function.clone(), value);
        }
        result.insert(key, Value::Object(row));
    }
    Ok(Value::Object(result))
}

fn decimal_field(record: &Value, field: &str) -> Result<Decimal, ApiError> {
    let raw = match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    raw.parse().map_err(|_| {
        error(
            StatusCode::BAD_REQUEST,
            "invalid_aggregate",
            format!("field {field} is not numeric"),
        )
    })
}

async fn get_customer(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.customers, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Customer", id))
}

async fn customer_orders(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.customers, id).ok_or_else(|| not_found("Customer", id))?;
    Ok(Json(Value::Array(select(&store.orders, "customer_id", id))))
}

async fn customer_payment_options(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.customers, id).ok_or_else(|| not_found("Customer", id))?;
    Ok(Json(Value::Array(select(&store.payment_options, "customer_id", id))))
}

async fn get_order(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.orders, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Order", id))
}

async fn list_subscriptions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let query = ListQuery::parse(params)?;
    debug!(?query, "list subscriptions");
    let store = state.store.read().await;
    Ok(Json(Value::Array(query.apply(&store.subscriptions))))
}

async fn get_subscription(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.subscriptions, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Subscription", id))
}

async fn subscription_orders(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.subscriptions, id).ok_or_else(|| not_found("Subscription", id))?;
    Ok(Json(Value::Array(select(&store.orders, "subsription_id", id))))
}

async fn list_payment_options(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let query = ListQuery::parse(params)?;
    let store = state.store.read().await;
    Ok(Json(Value::Array(query.apply(&store.payment_options))))
}

async fn get_payment_option(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let store = state.store.read().await;
    find_by_id(&store.payment_options, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Payment option", id))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult {
    let query = ListQuery::parse(params)?;
    debug!(?query, "list transactions");
    let store = state.store.read().await;
    let matched = query.apply(&store.transactions);
    match (&query.group, &query.aggregate) {
        (Some(group), Some(functions)) => aggregate(&matched, group, functions).map(Json),
        _ => Ok(Json(Value::Array(matched))),
    }
}

async fn get_plan(State(state): State<AppState>, Path((brand, sku)): Path<(String, String)>) -> ApiResult {
    let store = state.store.read().await;
    store
        .plans
        .iter()
        .find(|plan| plan["brand_slug"] == brand.as_str() && plan["sku"] == sku.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Plan", format!("{brand}/{sku}")))
}

async fn get_product(State(state): State<AppState>, Path((brand, sku)): Path<(String, String)>) -> ApiResult {
    let store = state.store.read().await;
    store
        .products
        .iter()
        .find(|product| product["brand_slug"] == brand.as_str() && product["sku"] == sku.as_str())
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Product", format!("{brand}/{sku}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn field_matches_numbers_and_strings() {
        let record = json!({"id": 7, "status": "active", "canceled": null});
        assert!(field_matches(&record, "id", "7"));
        assert!(field_matches(&record, "status", "active"));
        assert!(field_matches(&record, "canceled", "null"));
        assert!(!field_matches(&record, "status", "7"));
    }

    #[test]
    fn list_query_parses_filters_and_aggregate() {
        let query = ListQuery::parse(params(&[
            ("filter[order_id][eq]", "9"),
            ("group", "status"),
            ("aggregate", r#"["sum(amount)"]"#),
        ]))
        .unwrap();
        assert_eq!(query.filters, vec![("order_id".to_string(), "9".to_string())]);
        assert_eq!(query.group.as_deref(), Some("status"));
        assert_eq!(query.aggregate, Some(vec!["sum(amount)".to_string()]));
    }

    #[test]
    fn list_query_rejects_unknown_operator() {
        let (status, _) = ListQuery::parse(params(&[("filter[id][gt]", "1")])).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn aggregate_sums_and_counts_per_group() {
        let records = vec![
            json!({"status": "complete", "amount": "10.50"}),
            json!({"status": "complete", "amount": "4.50"}),
            json!({"status": "failed", "amount": "3.00"}),
        ];
        let result = aggregate(
            &records,
            "status",
            &["sum(amount)".to_string(), "count(*)".to_string()],
        )
        .unwrap();
        assert_eq!(result["complete"]["sum(amount)"], "15.00");
        assert_eq!(result["complete"]["count(*)"], 2);
        assert_eq!(result["failed"]["sum(amount)"], "3.00");
    }

    #[test]
    fn seeded_store_is_consistent() {
        let store = seeded();
        for order in &store.orders {
            let customer_id = order["customer_id"].as_i64().unwrap();
            assert!(find_by_id(&store.customers, customer_id).is_some());
        }
        for subscription in &store.subscriptions {
            let order_id = subscription["order_id"].as_i64().unwrap();
            assert!(find_by_id(&store.orders, order_id).is_some());
        }
    }
}
