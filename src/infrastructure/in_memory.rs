use crate::domain::email::EmailMessage;
use crate::domain::order::{OrderSummary, QuoteSummary};
use crate::domain::ports::{
    ConfigRepository, MailTransport, OrderRepository, QuoteRepository, SchemaManager,
    TransactionRepository,
};
use crate::domain::schema::TABLES;
use crate::domain::transaction::TransactionRecord;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct TransactionTable {
    next_id: u64,
    by_increment_id: HashMap<String, Vec<TransactionRecord>>,
}

/// A thread-safe in-memory transaction history.
///
/// Records are grouped by increment id in insertion order. `Clone` shares the
/// underlying table.
#[derive(Default, Clone)]
pub struct InMemoryTransactionRepository {
    table: Arc<RwLock<TransactionTable>>,
}

impl InMemoryTransactionRepository {
    /// Creates a new, empty in-memory transaction repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn last_transaction(&self, increment_id: &str) -> Result<Option<TransactionRecord>> {
        let table = self.table.read().await;
        Ok(table
            .by_increment_id
            .get(increment_id)
            .and_then(|records| records.last())
            .cloned())
    }

    async fn save(&self, mut record: TransactionRecord) -> Result<TransactionRecord> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        record.entity_id = Some(table.next_id);
        table
            .by_increment_id
            .entry(record.increment_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn history(&self, increment_id: &str) -> Result<Vec<TransactionRecord>> {
        let table = self.table.read().await;
        Ok(table
            .by_increment_id
            .get(increment_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Orders known to the host platform, keyed by increment id.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<String, OrderSummary>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, order: OrderSummary) {
        let mut orders = self.orders.write().await;
        orders.insert(order.increment_id.clone(), order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn load_by_increment_id(&self, increment_id: &str) -> Result<Option<OrderSummary>> {
        let orders = self.orders.read().await;
        Ok(orders.get(increment_id).cloned())
    }
}

/// Checkout quotes keyed by reserved order id.
#[derive(Default, Clone)]
pub struct InMemoryQuoteRepository {
    quotes: Arc<RwLock<HashMap<String, QuoteSummary>>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, quote: QuoteSummary) {
        let mut quotes = self.quotes.write().await;
        quotes.insert(quote.reserved_order_id.clone(), quote);
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn quote_by_reserved_order_id(
        &self,
        increment_id: &str,
    ) -> Result<Option<QuoteSummary>> {
        let quotes = self.quotes.read().await;
        Ok(quotes.get(increment_id).cloned())
    }
}

/// Outbox that keeps every sent message, optionally refusing all of them.
#[derive(Default, Clone)]
pub struct InMemoryMailTransport {
    sent: Arc<RwLock<Vec<EmailMessage>>>,
    fail: bool,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails.
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            fail: true,
        }
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl MailTransport for InMemoryMailTransport {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        if self.fail {
            return Err(PaymentError::MailError(format!(
                "Unable to send mail to {}",
                message.to
            )));
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}

/// Tracks which module tables exist. Starts with every module table present.
#[derive(Clone)]
pub struct InMemorySchema {
    tables: Arc<RwLock<HashSet<String>>>,
}

impl InMemorySchema {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(
                TABLES.iter().map(|table| table.to_string()).collect(),
            )),
        }
    }
}

impl Default for InMemorySchema {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaManager for InMemorySchema {
    async fn drop_table(&self, table: &str) -> Result<bool> {
        Ok(self.tables.write().await.remove(table))
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.tables.read().await.contains(table))
    }
}

#[derive(Default, Clone)]
pub struct InMemoryConfigRepository {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn set(&self, path: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(path.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(path).cloned())
    }

    async fn delete_by_prefixes(&self, prefixes: &[&str]) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|path, _| !prefixes.iter().any(|prefix| path.starts_with(prefix)));
        Ok(before - entries.len())
    }
}
