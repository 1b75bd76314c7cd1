//! Application layer orchestrating the domain through its ports.
//!
//! `TransactionResponseManager` reconciles vendor responses into the transaction
//! history, `GatewayActionHandler` guards and runs gateway actions, and the
//! notification services send best-effort e-mails on failure paths.

pub mod email_sender;
pub mod failed_order_notification;
pub mod gateway;
pub mod reconciliation;
pub mod uninstall;
