use super::email::EmailMessage;
use super::order::{OrderSummary, QuoteSummary};
use super::response::{
    CancelPaymentResponse, CapturePaymentRequest, CaptureResponse, PaymentResponse,
    RefundRequest, RefundResponse,
};
use super::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Transaction history keyed by order increment id.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Most recently saved record for the increment id.
    async fn last_transaction(&self, increment_id: &str) -> Result<Option<TransactionRecord>>;
    /// Inserts the record and returns it with its assigned `entity_id`.
    async fn save(&self, record: TransactionRecord) -> Result<TransactionRecord>;
    /// All records for the increment id, oldest first.
    async fn history(&self, increment_id: &str) -> Result<Vec<TransactionRecord>>;
}

/// Remote Worldline payment services.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn get_payment(&self, transaction_id: &str, store_id: u32) -> Result<PaymentResponse>;
    async fn cancel_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
    ) -> Result<CancelPaymentResponse>;
    async fn capture_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
        request: CapturePaymentRequest,
    ) -> Result<CaptureResponse>;
    async fn refund_payment(
        &self,
        transaction_id: &str,
        store_id: u32,
        request: RefundRequest,
    ) -> Result<RefundResponse>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn load_by_increment_id(&self, increment_id: &str) -> Result<Option<OrderSummary>>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn quote_by_reserved_order_id(&self, increment_id: &str)
    -> Result<Option<QuoteSummary>>;
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// Inline translation toggle that must be off while a template is rendered.
pub trait InlineTranslation: Send + Sync {
    fn suspend(&self);
    fn resume(&self);
    fn is_enabled(&self) -> bool;
}

#[async_trait]
pub trait SchemaManager: Send + Sync {
    /// Drops the table, returning whether it existed.
    async fn drop_table(&self, table: &str) -> Result<bool>;
    async fn table_exists(&self, table: &str) -> Result<bool>;
}

/// Persisted configuration entries addressed by slash separated paths.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn set(&self, path: &str, value: &str) -> Result<()>;
    async fn get(&self, path: &str) -> Result<Option<String>>;
    /// Deletes every entry whose path starts with one of the prefixes.
    async fn delete_by_prefixes(&self, prefixes: &[&str]) -> Result<usize>;
}

pub type TransactionRepositoryBox = Box<dyn TransactionRepository>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type OrderRepositoryBox = Box<dyn OrderRepository>;
pub type QuoteRepositoryBox = Box<dyn QuoteRepository>;
pub type MailTransportBox = Box<dyn MailTransport>;
pub type SchemaManagerBox = Box<dyn SchemaManager>;
pub type ConfigRepositoryBox = Box<dyn ConfigRepository>;

pub type TransactionRepositoryFactory = Box<dyn Fn() -> TransactionRepositoryBox + Send + Sync>;
