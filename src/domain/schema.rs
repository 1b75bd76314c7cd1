//! Tables and configuration paths owned by the module.

pub const LOG_TABLE: &str = "worldline_payment_log";
pub const FRAUD_TABLE: &str = "worldline_fraud_information";
pub const PAYMENT_TABLE: &str = "worldline_payment";
pub const REQUEST_LOG_TABLE: &str = "worldline_request_log";
pub const FAILED_PAYMENT_LOG_TABLE: &str = "worldline_failed_payment_log";
pub const TRANSACTION_TABLE: &str = "worldline_payment_transaction";
pub const REFUND_REQUEST_TABLE: &str = "worldline_refund_request";
pub const WEBHOOK_TABLE: &str = "worldline_webhook";

/// Tables owned by the module, in drop order.
pub const TABLES: [&str; 8] = [
    LOG_TABLE,
    FRAUD_TABLE,
    PAYMENT_TABLE,
    REQUEST_LOG_TABLE,
    FAILED_PAYMENT_LOG_TABLE,
    TRANSACTION_TABLE,
    REFUND_REQUEST_TABLE,
    WEBHOOK_TABLE,
];

pub const CONFIG_PATH_PREFIXES: [&str; 4] = [
    "worldline_connection/connection/",
    "worldline_connection/webhook/",
    "worldline_order_creator/general/",
    "worldline_debug/general/",
];
