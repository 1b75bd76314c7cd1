use crate::domain::ports::{ConfigRepository, SchemaManager, TransactionRepository};
use crate::domain::schema::{TABLES, TRANSACTION_TABLE};
use crate::domain::transaction::TransactionRecord;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Column Family for persisted configuration entries.
pub const CF_CONFIG: &str = "core_config_data";
/// Column Family for id sequences.
pub const CF_SEQUENCE: &str = "worldline_sequence";

const TRANSACTION_SEQUENCE_KEY: &[u8] = b"transaction";
const KEY_SEPARATOR: u8 = 0;

type Db = DBWithThreadMode<MultiThreaded>;

/// A persistent store implementation using RocksDB.
///
/// Every module table is its own Column Family, so dropping a table drops the
/// Column Family. Transaction keys are `increment_id \0 entity_id` with the id
/// big-endian, which keeps an order's history contiguous and sorted.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<Db>,
    sequence: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Missing Column Families are created, so a store opened after an
    /// uninstall starts with empty tables.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let descriptors = TABLES
            .iter()
            .copied()
            .chain([CF_CONFIG, CF_SEQUENCE])
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()));

        let db = Db::open_cf_descriptors(&opts, path, descriptors)?;

        Ok(Self {
            db: Arc::new(db),
            sequence: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db.cf_handle(name).ok_or_else(|| {
            PaymentError::InternalError(Box::new(std::io::Error::other(format!(
                "{} column family not found",
                name
            ))))
        })
    }

    fn next_transaction_id(&self) -> Result<u64> {
        let cf = self.cf(CF_SEQUENCE)?;
        let current = match self.db.get_cf(&cf, TRANSACTION_SEQUENCE_KEY)? {
            Some(bytes) => {
                let bytes: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    PaymentError::InternalError(Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "Corrupted transaction sequence",
                    )))
                })?;
                u64::from_be_bytes(bytes)
            }
            None => 0,
        };
        Ok(current + 1)
    }
}

fn transaction_prefix(increment_id: &str) -> Vec<u8> {
    let mut prefix = increment_id.as_bytes().to_vec();
    prefix.push(KEY_SEPARATOR);
    prefix
}

fn transaction_key(increment_id: &str, entity_id: u64) -> Vec<u8> {
    let mut key = transaction_prefix(increment_id);
    key.extend_from_slice(&entity_id.to_be_bytes());
    key
}

#[async_trait]
impl TransactionRepository for RocksDBStore {
    async fn last_transaction(&self, increment_id: &str) -> Result<Option<TransactionRecord>> {
        let cf = self.cf(TRANSACTION_TABLE)?;
        let prefix = transaction_prefix(increment_id);
        let upper_bound = transaction_key(increment_id, u64::MAX);

        let mut iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&upper_bound, Direction::Reverse));

        match iter.next() {
            Some(item) => {
                let (key, value) = item?;
                if !key.starts_with(&prefix) {
                    return Ok(None);
                }
                Ok(Some(serde_json::from_slice(&value)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, mut record: TransactionRecord) -> Result<TransactionRecord> {
        let _guard = self.sequence.lock().map_err(|_| {
            PaymentError::InternalError(Box::new(std::io::Error::other(
                "Transaction sequence lock poisoned",
            )))
        })?;

        let entity_id = self.next_transaction_id()?;
        record.entity_id = Some(entity_id);

        let transactions = self.cf(TRANSACTION_TABLE)?;
        let sequence = self.cf(CF_SEQUENCE)?;
        let value = serde_json::to_vec(&record)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &transactions,
            transaction_key(&record.increment_id, entity_id),
            value,
        );
        batch.put_cf(&sequence, TRANSACTION_SEQUENCE_KEY, entity_id.to_be_bytes());
        self.db.write(batch)?;

        Ok(record)
    }

    async fn history(&self, increment_id: &str) -> Result<Vec<TransactionRecord>> {
        let cf = self.cf(TRANSACTION_TABLE)?;
        let prefix = transaction_prefix(increment_id);

        let mut records = Vec::new();
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            records.push(serde_json::from_slice(&value)?);
        }

        Ok(records)
    }
}

#[async_trait]
impl SchemaManager for RocksDBStore {
    async fn drop_table(&self, table: &str) -> Result<bool> {
        if self.db.cf_handle(table).is_none() {
            return Ok(false);
        }
        self.db.drop_cf(table)?;
        Ok(true)
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.db.cf_handle(table).is_some())
    }
}

#[async_trait]
impl ConfigRepository for RocksDBStore {
    async fn set(&self, path: &str, value: &str) -> Result<()> {
        let cf = self.cf(CF_CONFIG)?;
        self.db.put_cf(&cf, path.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Option<String>> {
        let cf = self.cf(CF_CONFIG)?;
        let value = self.db.get_cf(&cf, path.as_bytes())?;
        Ok(value.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    async fn delete_by_prefixes(&self, prefixes: &[&str]) -> Result<usize> {
        let cf = self.cf(CF_CONFIG)?;
        let mut batch = WriteBatch::default();
        let mut deleted = 0;

        for prefix in prefixes {
            let iter = self.db.iterator_cf(
                &cf,
                IteratorMode::From(prefix.as_bytes(), Direction::Forward),
            );
            for item in iter {
                let (key, _) = item?;
                if !key.starts_with(prefix.as_bytes()) {
                    break;
                }
                batch.delete_cf(&cf, key);
                deleted += 1;
            }
        }

        self.db.write(batch)?;
        Ok(deleted)
    }
}
