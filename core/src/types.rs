//! Response DTOs for the accounts API.
//!
//! # Design
//! These are read-only snapshots decoded from service responses. Field names
//! follow the service's JSON keys. Nullable wire fields are `Option`; those
//! the service omits when empty are skipped on serialization, the rest
//! serialize as `null`. A present empty string decodes to `Some("")`, never
//! to `None`.
//!
//! Processor detail blobs on orders, transactions and subscriptions are
//! processor-specific and kept as open JSON objects.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Monetary amount. Opaque to this crate; it only round-trips the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub brand_slug: String,
    #[serde(default)]
    pub data: CustomerData,
}

/// Login bookkeeping the service stores on a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerData {
    #[serde(rename = "login.history")]
    pub login_history: Vec<CustomerLoginHistory>,
    #[serde(rename = "login.latest_ip")]
    pub login_latest_ip: String,
    /// Unix seconds.
    #[serde(rename = "login.latest_time")]
    pub login_latest_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLoginHistory {
    pub ip: String,
    pub time: i64,
}

/// A stored payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub id: i64,
    pub customer_id: i64,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: String,
    pub payment_processor: String,
    #[serde(default)]
    pub payment_processor_details: PaymentOptionDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    pub brand_slug: String,
}

/// Masked card metadata reported by the processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentOptionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_validation_result: Option<String>,
}

/// A purchase or renewal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub payment_option_id: i64,
    /// The service spells this key `subsription_id`.
    #[serde(rename = "subsription_id", alias = "subscription_id")]
    pub subscription_id: Option<i64>,
    pub customer_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub cycle: Option<i64>,
    pub status: String,
    pub amount: Amount,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub payment_processor: String,
    #[serde(default)]
    pub payment_processor_details: Map<String, Value>,
    pub brand_slug: String,
    pub begins: DateTime<Utc>,
    pub ends: DateTime<Utc>,
    /// Plan sku to quantity.
    #[serde(default)]
    pub plans: BTreeMap<String, OrderQuantity>,
    /// Product sku to quantity.
    #[serde(default)]
    pub products: BTreeMap<String, OrderQuantity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuantity {
    pub quantity: i64,
}

/// A financial movement tied to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub brand_slug: String,
    pub order_id: i64,
    pub customer_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub amount: Amount,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub payment_processor: String,
    pub payment_processor_id: Option<String>,
    #[serde(default)]
    pub payment_processor_details: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    pub payment_option_id: i64,
}

/// A recurring billing agreement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub brand_slug: String,
    pub order_id: i64,
    pub customer_id: i64,
    pub status: String,
    pub cycle: i64,
    pub plan_sku: String,
    pub payment_processor: String,
    #[serde(default)]
    pub payment_processor_details: Map<String, Value>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub canceled: Option<DateTime<Utc>>,
    /// When the next renewal runs.
    pub next: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

/// A sellable recurring offering, identified by `(brand_slug, sku)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub brand_slug: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub terms: String,
    pub trial_price: Amount,
    pub trial_period: i64,
    pub trial_interval: String,
    pub recurring_price: Amount,
    pub recurring_period: i64,
    pub recurring_interval: String,
    /// Cap on renewals; `None` renews indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_cycles: Option<i64>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub href: String,
    /// Product sku to trial/recurring quantities.
    #[serde(default)]
    pub products: BTreeMap<String, PlanQuantity>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuantity {
    pub recurring_quantity: i64,
    pub trial_quantity: i64,
}

/// A sellable one-time offering, identified by `(brand_slug, sku)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub brand_slug: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: Amount,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    fn order() -> Order {
        Order {
            id: 10,
            payment_option_id: 3,
            subscription_id: None,
            customer_id: 1,
            kind: "purchase".to_string(),
            cycle: Some(0),
            status: "complete".to_string(),
            amount: Amount::new(Decimal::new(1999, 2)),
            created: ts("2024-01-01T00:00:00Z"),
            updated: ts("2024-01-01T00:00:00Z"),
            payment_processor: "braintree".to_string(),
            payment_processor_details: Map::new(),
            brand_slug: "acme".to_string(),
            begins: ts("2024-01-01T00:00:00Z"),
            ends: ts("2024-02-01T00:00:00Z"),
            plans: BTreeMap::from([("gold".to_string(), OrderQuantity { quantity: 1 })]),
            products: BTreeMap::new(),
        }
    }

    #[test]
    fn order_roundtrips_through_json() {
        let order = order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn order_uses_service_spelling_for_subscription_key() {
        let mut order = order();
        order.subscription_id = Some(4);
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["subsription_id"], 4);
        assert_eq!(json["type"], "purchase");
        assert_eq!(json["amount"], "19.99");
    }

    #[test]
    fn null_subscription_id_is_serialized_as_null() {
        let json = serde_json::to_value(order()).unwrap();
        assert!(json.get("subsription_id").unwrap().is_null());
    }

    #[test]
    fn customer_decodes_login_history() {
        let customer: Customer = serde_json::from_str(
            r#"{
                "id": 1,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "phone": null,
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-02T00:00:00Z",
                "brand_slug": "acme",
                "data": {
                    "login.history": [{"ip": "10.0.0.1", "time": 1700000000}],
                    "login.latest_ip": "10.0.0.1",
                    "login.latest_time": 1700000000
                }
            }"#,
        )
        .unwrap();
        assert!(customer.phone.is_none());
        assert_eq!(customer.data.login_history.len(), 1);
        assert_eq!(customer.data.login_latest_ip, "10.0.0.1");
    }

    #[test]
    fn customer_distinguishes_null_from_empty_phone() {
        let base = r#""id":1,"first_name":"A","last_name":"B","email":"e","created":"2024-01-01T00:00:00Z","updated":"2024-01-01T00:00:00Z","brand_slug":"acme""#;
        let null: Customer = serde_json::from_str(&format!(r#"{{{base},"phone":null}}"#)).unwrap();
        let empty: Customer = serde_json::from_str(&format!(r#"{{{base},"phone":""}}"#)).unwrap();
        let absent: Customer = serde_json::from_str(&format!("{{{base}}}")).unwrap();
        assert_eq!(null.phone, None);
        assert_eq!(empty.phone.as_deref(), Some(""));
        assert_eq!(absent.phone, None);
        assert_eq!(absent.data, CustomerData::default());
    }

    #[test]
    fn payment_option_details_omit_absent_fields() {
        let details = PaymentOptionDetails {
            last4: Some("4242".to_string()),
            card_network: Some(String::new()),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json, serde_json::json!({"last4": "4242", "card_network": ""}));
        let back: PaymentOptionDetails = serde_json::from_value(json).unwrap();
        assert_eq!(back, details);
    }

    #[test]
    fn subscription_roundtrips_with_cancellation() {
        let sub = Subscription {
            id: 2,
            brand_slug: "acme".to_string(),
            order_id: 10,
            customer_id: 1,
            status: "canceled".to_string(),
            cycle: 3,
            plan_sku: "gold".to_string(),
            payment_processor: "braintree".to_string(),
            payment_processor_details: Map::new(),
            created: ts("2024-01-01T00:00:00Z"),
            updated: ts("2024-03-01T00:00:00Z"),
            canceled: Some(ts("2024-03-01T00:00:00Z")),
            next: ts("2024-04-01T00:00:00Z"),
            failure_code: Some("declined".to_string()),
            failure_message: None,
        };
        let json = serde_json::to_value(&sub).unwrap();
        assert!(json.get("failure_message").is_none());
        let back: Subscription = serde_json::from_value(json).unwrap();
        assert_eq!(back, sub);
    }

    #[test]
    fn customer_roundtrips_with_login_data() {
        let customer = Customer {
            id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some(String::new()),
            created: ts("2024-01-01T00:00:00Z"),
            updated: ts("2024-01-02T12:30:00Z"),
            brand_slug: "acme".to_string(),
            data: CustomerData {
                login_history: vec![
                    CustomerLoginHistory { ip: "10.0.0.1".to_string(), time: 1700000000 },
                    CustomerLoginHistory { ip: "10.0.0.2".to_string(), time: 1700003600 },
                ],
                login_latest_ip: "10.0.0.2".to_string(),
                login_latest_time: 1700003600,
            },
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["phone"], "");
        assert_eq!(json["data"]["login.latest_ip"], "10.0.0.2");
        assert_eq!(json["data"]["login.history"][1]["time"], 1700003600);
        let back: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(back, customer);

        let anonymous = Customer { phone: None, data: CustomerData::default(), ..customer };
        let json = serde_json::to_value(&anonymous).unwrap();
        assert!(json["phone"].is_null());
        let back: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(back, anonymous);
    }

    #[test]
    fn payment_option_keeps_empty_failure_fields() {
        let option = PaymentOption {
            id: 2,
            customer_id: 1,
            created: ts("2024-01-01T00:00:00Z"),
            updated: ts("2024-01-01T00:00:00Z"),
            status: "active".to_string(),
            payment_processor: "braintree".to_string(),
            payment_processor_details: PaymentOptionDetails {
                last4: Some("4242".to_string()),
                exp_month: Some("12".to_string()),
                exp_year: Some("2030".to_string()),
                ..Default::default()
            },
            failure_code: Some(String::new()),
            failure_message: Some(String::new()),
            brand_slug: "acme".to_string(),
        };
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["failure_code"], "");
        assert_eq!(json["failure_message"], "");
        let back: PaymentOption = serde_json::from_value(json).unwrap();
        assert_eq!(back, option);

        let healthy = PaymentOption { failure_code: None, failure_message: None, ..option };
        let json = serde_json::to_value(&healthy).unwrap();
        assert!(json.get("failure_code").is_none());
        assert!(json.get("failure_message").is_none());
        let back: PaymentOption = serde_json::from_value(json).unwrap();
        assert_eq!(back, healthy);
    }

    #[test]
    fn transaction_without_processor_id_roundtrips() {
        let transaction = Transaction {
            id: 31,
            brand_slug: "acme".to_string(),
            order_id: 11,
            customer_id: 1,
            kind: "sale".to_string(),
            status: "failed".to_string(),
            amount: Amount::new(Decimal::new(999, 2)),
            created: ts("2024-02-01T00:00:00Z"),
            updated: ts("2024-02-01T00:00:00Z"),
            payment_processor: "braintree".to_string(),
            payment_processor_id: None,
            payment_processor_details: Map::new(),
            failure_code: None,
            failure_message: None,
            payment_option_id: 2,
        };
        let json = serde_json::to_value(&transaction).unwrap();
        assert!(json.get("payment_processor_id").unwrap().is_null());
        assert!(json.get("failure_code").is_none());
        assert!(json.get("failure_message").is_none());
        assert_eq!(json["type"], "sale");
        assert_eq!(json["amount"], "9.99");
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, transaction);

        let declined = Transaction {
            payment_processor_id: Some("bt_9".to_string()),
            failure_code: Some("2001".to_string()),
            failure_message: Some("Insufficient Funds".to_string()),
            ..transaction
        };
        let json = serde_json::to_string(&declined).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, declined);
    }

    #[test]
    fn product_roundtrips_through_json() {
        let product = Product {
            id: 40,
            brand_slug: "acme".to_string(),
            sku: "widget".to_string(),
            name: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Amount::new(Decimal::new(500, 2)),
            kind: "physical".to_string(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["type"], "physical");
        assert_eq!(json["price"], "5.00");
        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn plan_keeps_open_data_map() {
        let plan: Plan = serde_json::from_str(
            r#"{
                "id": 5, "brand_slug": "acme", "sku": "gold", "name": "Gold",
                "description": "Gold tier", "terms": "",
                "trial_price": "0", "trial_period": 7, "trial_interval": "day",
                "recurring_price": "9.99", "recurring_period": 1, "recurring_interval": "month",
                "created": "2024-01-01T00:00:00Z", "updated": "2024-01-01T00:00:00Z",
                "status": "active", "data": {"tier": 3, "features": ["a", "b"]},
                "href": "/v1/brands/acme/plans/gold",
                "products": {"widget": {"trial_quantity": 1, "recurring_quantity": 2}}
            }"#,
        )
        .unwrap();
        assert!(plan.recurring_cycles.is_none());
        assert_eq!(plan.data["tier"], 3);
        assert_eq!(plan.recurring_price, Amount::new(Decimal::new(999, 2)));
        assert_eq!(
            plan.products["widget"],
            PlanQuantity { trial_quantity: 1, recurring_quantity: 2 }
        );
        let back: Plan = serde_json::from_value(serde_json::to_value(&plan).unwrap()).unwrap();
        assert_eq!(back, plan);
    }
}
