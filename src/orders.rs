//! In-memory order fixture standing in for the tailor shop's CRM.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const STATUS_NOT_FOUND: &str = "Not Found";
pub const DELIVERY_CODE_MISSING: &str = "ERROR";

/// A single customer order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub status: String,
    pub customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_code: Option<String>,
}

/// Read-only lookup table of orders keyed by order id
#[derive(Debug, Clone, Default)]
pub struct OrderDatabase {
    orders: HashMap<String, OrderRecord>,
}

impl OrderDatabase {
    /// The two orders the demo shop knows about
    pub fn fixture() -> Self {
        let mut orders = HashMap::new();
        orders.insert(
            "001".to_string(),
            OrderRecord {
                status: "Ready for Fitting".to_string(),
                customer: "Aisha".to_string(),
                delivery_code: None,
            },
        );
        orders.insert(
            "002".to_string(),
            OrderRecord {
                status: "Ready for Dispatch".to_string(),
                customer: "Chinedu".to_string(),
                delivery_code: Some("GQ9U88levi".to_string()),
            },
        );
        Self { orders }
    }

    pub fn get(&self, order_id: &str) -> Option<&OrderRecord> {
        self.orders.get(order_id)
    }

    /// Status of an order, or "Not Found"
    pub fn status_of(&self, order_id: &str) -> &str {
        self.get(order_id)
            .map(|order| order.status.as_str())
            .unwrap_or(STATUS_NOT_FOUND)
    }

    /// Delivery code of an order, or "ERROR" when the order or code is absent
    pub fn delivery_code_of(&self, order_id: &str) -> &str {
        self.get(order_id)
            .and_then(|order| order.delivery_code.as_deref())
            .unwrap_or(DELIVERY_CODE_MISSING)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
