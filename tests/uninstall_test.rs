use worldline_payment_core::application::uninstall::Uninstaller;
use worldline_payment_core::domain::ports::{ConfigRepository, SchemaManager};
use worldline_payment_core::domain::schema::{TABLES, TRANSACTION_TABLE};
use worldline_payment_core::infrastructure::in_memory::{InMemoryConfigRepository, InMemorySchema};

#[tokio::test]
async fn test_uninstall_removes_tables_and_config() {
    let schema = InMemorySchema::new();
    let config = InMemoryConfigRepository::new();
    for (path, value) in [
        ("worldline_connection/connection/api_key", "key"),
        ("worldline_connection/webhook/secret_key", "secret"),
        ("worldline_order_creator/general/enabled", "1"),
        ("worldline_debug/general/log_mode", "all"),
        ("worldline_payment/general/title", "Worldline"),
        ("general/locale/code", "en_US"),
    ] {
        config.set(path, value).await.unwrap();
    }

    let uninstaller = Uninstaller::new(Box::new(schema.clone()), Box::new(config.clone()));
    let report = uninstaller.uninstall().await.unwrap();

    assert_eq!(report.dropped_tables.len(), TABLES.len());
    assert_eq!(report.deleted_config_entries, 4);
    for table in TABLES {
        assert!(!schema.table_exists(table).await.unwrap());
    }
    assert!(
        config
            .get("worldline_connection/connection/api_key")
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(
        config
            .get("worldline_payment/general/title")
            .await
            .unwrap()
            .as_deref(),
        Some("Worldline")
    );
    assert!(config.get("general/locale/code").await.unwrap().is_some());
}

#[tokio::test]
async fn test_uninstall_skips_missing_tables() {
    let schema = InMemorySchema::new();
    schema.drop_table(TRANSACTION_TABLE).await.unwrap();

    let uninstaller = Uninstaller::new(
        Box::new(schema.clone()),
        Box::new(InMemoryConfigRepository::new()),
    );
    let report = uninstaller.uninstall().await.unwrap();

    assert_eq!(report.dropped_tables.len(), TABLES.len() - 1);
    assert!(!report.dropped_tables.iter().any(|t| t == TRANSACTION_TABLE));
    assert_eq!(report.deleted_config_entries, 0);

    let again = uninstaller.uninstall().await.unwrap();
    assert!(again.dropped_tables.is_empty());
}
