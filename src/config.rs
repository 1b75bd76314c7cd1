//! Application configuration loaded from a TOML file.
//!
//! ```toml
//! [identities.general]
//! name = "Store Owner"
//! email = "owner@example.com"
//!
//! [order_notification]
//! enabled = true
//! recipient = "general"
//! sender = "general"
//! email_template = "worldline_failed_order_creation"
//!
//! [order_synchronization]
//! refused_payment_sender = "sales"
//! refused_payment_template = "worldline_payment_refused"
//!
//! [order_synchronization.stores.2]
//! refused_payment_template = "worldline_payment_refused_fr"
//! ```

use crate::domain::email::Mailbox;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Sender identities addressable by code, e.g. `general` or `sales`.
    pub identities: HashMap<String, SenderIdentity>,
    pub order_notification: OrderNotificationConfig,
    pub order_synchronization: OrderSynchronizationConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SenderIdentity {
    pub name: String,
    pub email: String,
}

/// Failed order creation notification settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrderNotificationConfig {
    pub enabled: bool,
    pub recipient: String,
    pub sender: String,
    pub email_template: String,
}

impl Default for OrderNotificationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            recipient: "general".to_string(),
            sender: "general".to_string(),
            email_template: "worldline_failed_order_creation".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrderSynchronizationConfig {
    pub refused_payment_sender: String,
    pub refused_payment_template: String,
    /// Per-store overrides keyed by store id.
    pub stores: HashMap<String, StoreOverride>,
}

impl Default for OrderSynchronizationConfig {
    fn default() -> Self {
        Self {
            refused_payment_sender: "general".to_string(),
            refused_payment_template: "worldline_payment_refused".to_string(),
            stores: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreOverride {
    pub refused_payment_sender: Option<String>,
    pub refused_payment_template: Option<String>,
}

impl OrderSynchronizationConfig {
    fn store(&self, store_id: u32) -> Option<&StoreOverride> {
        self.stores.get(&store_id.to_string())
    }

    pub fn refused_payment_sender(&self, store_id: u32) -> &str {
        self.store(store_id)
            .and_then(|store| store.refused_payment_sender.as_deref())
            .unwrap_or(&self.refused_payment_sender)
    }

    pub fn refused_payment_template(&self, store_id: u32) -> &str {
        self.store(store_id)
            .and_then(|store| store.refused_payment_template.as_deref())
            .unwrap_or(&self.refused_payment_template)
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        tracing::debug!("Loading configuration from: {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| {
            PaymentError::ConfigError(format!("Failed to read config file {:?}: {}", path_ref, e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PaymentError::ConfigError(format!("Failed to parse TOML: {}", e)))
    }

    pub fn sender_resolver(&self) -> SenderResolver {
        SenderResolver {
            identities: self.identities.clone(),
        }
    }
}

/// Resolves sender identity codes to mailboxes.
#[derive(Debug, Clone, Default)]
pub struct SenderResolver {
    identities: HashMap<String, SenderIdentity>,
}

impl SenderResolver {
    pub fn new(identities: HashMap<String, SenderIdentity>) -> Self {
        Self { identities }
    }

    pub fn resolve(&self, identity: &str) -> Result<Mailbox> {
        let sender = self
            .identities
            .get(identity)
            .ok_or_else(|| PaymentError::MailError("Invalid sender data".to_string()))?;
        Ok(Mailbox {
            name: Some(sender.name.clone()),
            email: sender.email.clone(),
        })
    }
}
