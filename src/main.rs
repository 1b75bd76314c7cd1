use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use worldline_payment_core::application::email_sender::EmailSender;
use worldline_payment_core::application::failed_order_notification::FailedOrderCreationNotification;
use worldline_payment_core::application::reconciliation::TransactionResponseManager;
use worldline_payment_core::application::uninstall::Uninstaller;
use worldline_payment_core::config::AppConfig;
use worldline_payment_core::domain::ports::{
    ConfigRepository, ConfigRepositoryBox, SchemaManagerBox, TransactionRepositoryBox,
};
use worldline_payment_core::infrastructure::in_memory::{
    InMemoryConfigRepository, InMemoryQuoteRepository, InMemorySchema,
    InMemoryTransactionRepository,
};
use worldline_payment_core::infrastructure::mail::{InlineTranslationState, LogMailTransport};
use worldline_payment_core::interfaces::csv::transaction_writer::TransactionWriter;
use worldline_payment_core::interfaces::webhook::{
    TransactionWebhookProcessor, WebhookDispatcher, WebhookEvent,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Path to the TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile webhook events (one JSON object per line) and print the resulting history.
    Ingest { file: PathBuf },
    /// Print the transaction history of an order.
    History { increment_id: String },
    /// Store a configuration entry.
    ConfigSet { path: String, value: String },
    /// Drop module tables and configuration entries.
    Uninstall,
}

struct Stores {
    transactions: TransactionRepositoryBox,
    schema: SchemaManagerBox,
    config: ConfigRepositoryBox,
}

impl Stores {
    fn in_memory() -> Self {
        Self {
            transactions: Box::new(InMemoryTransactionRepository::new()),
            schema: Box::new(InMemorySchema::new()),
            config: Box::new(InMemoryConfigRepository::new()),
        }
    }

    #[cfg(feature = "storage-rocksdb")]
    fn open(db_path: Option<PathBuf>) -> Result<Self> {
        use worldline_payment_core::infrastructure::rocksdb::RocksDBStore;

        let Some(db_path) = db_path else {
            return Ok(Self::in_memory());
        };
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        Ok(Self {
            transactions: Box::new(store.clone()),
            schema: Box::new(store.clone()),
            config: Box::new(store),
        })
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    fn open(db_path: Option<PathBuf>) -> Result<Self> {
        if db_path.is_some() {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
        }
        Ok(Self::in_memory())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path).into_diagnostic()?,
        None => AppConfig::default(),
    };
    let stores = Stores::open(cli.db_path)?;

    match cli.command {
        Command::Ingest { file } => ingest(file, &config, stores.transactions).await,
        Command::History { increment_id } => {
            let manager = TransactionResponseManager::new(stores.transactions);
            let records = manager.history(&increment_id).await.into_diagnostic()?;
            let stdout = io::stdout();
            TransactionWriter::new(stdout.lock())
                .write_records(&records)
                .into_diagnostic()
        }
        Command::ConfigSet { path, value } => {
            stores.config.set(&path, &value).await.into_diagnostic()
        }
        Command::Uninstall => {
            let report = Uninstaller::new(stores.schema, stores.config)
                .uninstall()
                .await
                .into_diagnostic()?;
            for table in &report.dropped_tables {
                println!("dropped table {}", table);
            }
            println!("deleted {} config entries", report.deleted_config_entries);
            Ok(())
        }
    }
}

async fn ingest(
    file: PathBuf,
    config: &AppConfig,
    transactions: TransactionRepositoryBox,
) -> Result<()> {
    let manager = Arc::new(TransactionResponseManager::new(transactions));

    let email_sender = Arc::new(EmailSender::new(
        Box::new(LogMailTransport::new()),
        Arc::new(InlineTranslationState::default()),
        config.sender_resolver(),
        config.order_synchronization.clone(),
    ));
    // No checkout quotes exist outside the shop, so notifications from the CLI
    // carry the order id and error message with blank quote fields.
    let notification = Arc::new(FailedOrderCreationNotification::new(
        email_sender,
        config.order_notification.clone(),
        config.sender_resolver(),
        Box::new(InMemoryQuoteRepository::new()),
    ));
    let dispatcher = WebhookDispatcher::new(vec![Box::new(TransactionWebhookProcessor::new(
        manager.clone(),
    ))])
    .with_notification(notification);

    // Orders in first-seen order
    let mut increment_ids: Vec<String> = Vec::new();

    let reader = BufReader::new(File::open(file).into_diagnostic()?);
    for line in reader.lines() {
        let line = line.into_diagnostic()?;
        if line.trim().is_empty() {
            continue;
        }
        let event = match WebhookEvent::from_json(&line) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("Error reading webhook event: {}", e);
                continue;
            }
        };
        if let Some(increment_id) = event.merchant_reference()
            && !increment_ids.iter().any(|seen| seen == increment_id)
        {
            increment_ids.push(increment_id.to_string());
        }
        if let Err(e) = dispatcher.dispatch(&event).await {
            eprintln!("Error processing webhook event: {}", e);
        }
    }

    let mut records = Vec::new();
    for increment_id in &increment_ids {
        records.extend(manager.history(increment_id).await.into_diagnostic()?);
    }

    let stdout = io::stdout();
    TransactionWriter::new(stdout.lock())
        .write_records(&records)
        .into_diagnostic()
}
