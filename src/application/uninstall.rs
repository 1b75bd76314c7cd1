use crate::domain::ports::{ConfigRepositoryBox, SchemaManagerBox};
use crate::domain::schema::{CONFIG_PATH_PREFIXES, TABLES};
use crate::error::Result;
use tracing::info;

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct UninstallReport {
    pub dropped_tables: Vec<String>,
    pub deleted_config_entries: usize,
}

/// Removes every table and configuration entry the module created.
pub struct Uninstaller {
    schema: SchemaManagerBox,
    config: ConfigRepositoryBox,
}

impl Uninstaller {
    pub fn new(schema: SchemaManagerBox, config: ConfigRepositoryBox) -> Self {
        Self { schema, config }
    }

    pub async fn uninstall(&self) -> Result<UninstallReport> {
        let mut report = UninstallReport::default();

        for table in TABLES {
            if self.schema.drop_table(table).await? {
                report.dropped_tables.push(table.to_string());
            }
        }

        report.deleted_config_entries = self
            .config
            .delete_by_prefixes(&CONFIG_PATH_PREFIXES)
            .await?;

        info!(
            dropped_tables = report.dropped_tables.len(),
            deleted_config_entries = report.deleted_config_entries,
            "Module data removed"
        );
        Ok(report)
    }
}
