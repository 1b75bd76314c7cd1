use serde::{Deserialize, Serialize};

/// The subset of a host platform order the plugin needs to know about.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct OrderSummary {
    pub entity_id: u64,
    pub increment_id: String,
    pub store_id: u32,
}

/// Checkout quote context, looked up by the order id reserved for it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct QuoteSummary {
    pub reserved_order_id: String,
    pub store_id: u32,
    pub customer_email: Option<String>,
    /// Worldline payment id stored in the quote payment's additional information.
    pub payment_id: Option<String>,
}
