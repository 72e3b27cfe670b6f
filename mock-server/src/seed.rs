//! Fixture data served by `app()`.
//!
//! Two acme customers; customer 1 has a purchase order (10) that opened two
//! subscriptions and a renewal order (11) billed through subscription 20.

use serde_json::json;

use crate::Store;

pub fn seeded() -> Store {
    Store {
        customers: vec![
            json!({
                "id": 1,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-05T00:00:00Z",
                "brand_slug": "acme",
                "data": {
                    "login.history": [
                        {"ip": "10.0.0.1", "time": 1704067200},
                        {"ip": "10.0.0.2", "time": 1704412800}
                    ],
                    "login.latest_ip": "10.0.0.2",
                    "login.latest_time": 1704412800
                }
            }),
            json!({
                "id": 2,
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "grace@example.com",
                "phone": null,
                "created": "2024-02-01T00:00:00Z",
                "updated": "2024-02-01T00:00:00Z",
                "brand_slug": "acme",
                "data": {}
            }),
        ],
        payment_options: vec![
            json!({
                "id": 1,
                "customer_id": 1,
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-01T00:00:00Z",
                "status": "active",
                "payment_processor": "braintree",
                "payment_processor_details": {
                    "bin": "424242",
                    "last4": "4242",
                    "exp_month": "12",
                    "exp_year": "2030",
                    "card_network": "visa"
                },
                "brand_slug": "acme"
            }),
            json!({
                "id": 2,
                "customer_id": 2,
                "created": "2024-02-01T00:00:00Z",
                "updated": "2024-02-02T00:00:00Z",
                "status": "failed",
                "payment_processor": "braintree",
                "payment_processor_details": {},
                "failure_code": "2001",
                "failure_message": "Insufficient Funds",
                "brand_slug": "acme"
            }),
        ],
        orders: vec![
            json!({
                "id": 10,
                "payment_option_id": 1,
                "subsription_id": null,
                "customer_id": 1,
                "type": "purchase",
                "cycle": null,
                "status": "complete",
                "amount": "19.99",
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-01T00:00:00Z",
                "payment_processor": "braintree",
                "payment_processor_details": {},
                "brand_slug": "acme",
                "begins": "2024-01-01T00:00:00Z",
                "ends": "2024-02-01T00:00:00Z",
                "plans": {"gold": {"quantity": 1}, "silver": {"quantity": 1}},
                "products": {"widget": {"quantity": 2}}
            }),
            json!({
                "id": 11,
                "payment_option_id": 1,
                "subsription_id": 20,
                "customer_id": 1,
                "type": "renewal",
                "cycle": 1,
                "status": "complete",
                "amount": "9.99",
                "created": "2024-02-01T00:00:00Z",
                "updated": "2024-02-01T00:00:00Z",
                "payment_processor": "braintree",
                "payment_processor_details": {"transaction_ref": "bt_123"},
                "brand_slug": "acme",
                "begins": "2024-02-01T00:00:00Z",
                "ends": "2024-03-01T00:00:00Z",
                "plans": {"gold": {"quantity": 1}},
                "products": {}
            }),
        ],
        subscriptions: vec![
            json!({
                "id": 20,
                "brand_slug": "acme",
                "order_id": 10,
                "customer_id": 1,
                "status": "active",
                "cycle": 1,
                "plan_sku": "gold",
                "payment_processor": "braintree",
                "payment_processor_details": {},
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-02-01T00:00:00Z",
                "canceled": null,
                "next": "2024-03-01T00:00:00Z"
            }),
            json!({
                "id": 21,
                "brand_slug": "acme",
                "order_id": 10,
                "customer_id": 1,
                "status": "canceled",
                "cycle": 0,
                "plan_sku": "silver",
                "payment_processor": "braintree",
                "payment_processor_details": {},
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-15T00:00:00Z",
                "canceled": "2024-01-15T00:00:00Z",
                "next": "2024-02-01T00:00:00Z",
                "failure_code": "canceled_by_customer"
            }),
        ],
        transactions: vec![
            json!({
                "id": 30,
                "brand_slug": "acme",
                "order_id": 10,
                "customer_id": 1,
                "type": "sale",
                "status": "complete",
                "amount": "19.99",
                "created": "2024-01-01T00:00:00Z",
                "updated": "2024-01-01T00:00:00Z",
                "payment_processor": "braintree",
                "payment_processor_id": "bt_100",
                "payment_processor_details": {},
                "payment_option_id": 1
            }),
            json!({
                "id": 31,
                "brand_slug": "acme",
                "order_id": 11,
                "customer_id": 1,
                "type": "sale",
                "status": "failed",
                "amount": "9.99",
                "created": "2024-02-01T00:00:00Z",
                "updated": "2024-02-01T00:00:00Z",
                "payment_processor": "braintree",
                "payment_processor_id": null,
                "payment_processor_details": {},
                "failure_code": "2001",
                "failure_message": "Insufficient Funds",
                "payment_option_id": 1
            }),
            json!({
                "id": 32,
                "brand_slug": "acme",
                "order_id": 11,
                "customer_id": 1,
                "type": "sale",
                "status": "complete",
                "amount": "9.99",
                "created": "2024-02-02T00:00:00Z",
                "updated": "2024-02-02T00:00:00Z",
                "payment_processor": "braintree",
                "payment_processor_id": "bt_101",
                "payment_processor_details": {},
                "payment_option_id": 1
            }),
        ],
        plans: vec![
            json!({
                "id": 1,
                "brand_slug": "acme",
                "sku": "gold",
                "name": "Gold",
                "description": "Everything, monthly",
                "terms": "Renews monthly until canceled.",
                "trial_price": "0.00",
                "trial_period": 7,
                "trial_interval": "day",
                "recurring_price": "9.99",
                "recurring_period": 1,
                "recurring_interval": "month",
                "created": "2023-12-01T00:00:00Z",
                "updated": "2023-12-01T00:00:00Z",
                "status": "active",
                "data": {"tier": 3},
                "href": "/v1/brands/acme/plans/gold",
                "products": {"widget": {"trial_quantity": 1, "recurring_quantity": 2}}
            }),
            json!({
                "id": 2,
                "brand_slug": "acme",
                "sku": "silver",
                "name": "Silver",
                "description": "The basics, twelve months",
                "terms": "",
                "trial_price": "0.00",
                "trial_period": 0,
                "trial_interval": "day",
                "recurring_price": "4.99",
                "recurring_period": 1,
                "recurring_interval": "month",
                "recurring_cycles": 12,
                "created": "2023-12-01T00:00:00Z",
                "updated": "2023-12-01T00:00:00Z",
                "status": "active",
                "data": {},
                "href": "/v1/brands/acme/plans/silver",
                "products": {}
            }),
        ],
        products: vec![json!({
            "id": 1,
            "brand_slug": "acme",
            "sku": "widget",
            "name": "Widget",
            "description": "A single widget",
            "price": "5.00",
            "type": "physical"
        })],
    }
}
