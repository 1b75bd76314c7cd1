use super::email_sender::EmailSender;
use crate::config::{OrderNotificationConfig, SenderResolver};
use crate::domain::email::{TemplateOptions, TemplateVars};
use crate::domain::ports::QuoteRepositoryBox;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tracing::{error, warn};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Subsystem in which order creation failed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NotificationSpace {
    Webhook,
    WaitingPage,
    Cron,
}

impl NotificationSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationSpace::Webhook => "webhook",
            NotificationSpace::WaitingPage => "waiting page",
            NotificationSpace::Cron => "cron",
        }
    }
}

impl fmt::Display for NotificationSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alerts the merchant when an order could not be created from a payment.
pub struct FailedOrderCreationNotification {
    email_sender: Arc<EmailSender>,
    config: OrderNotificationConfig,
    senders: SenderResolver,
    quotes: QuoteRepositoryBox,
}

impl FailedOrderCreationNotification {
    pub fn new(
        email_sender: Arc<EmailSender>,
        config: OrderNotificationConfig,
        senders: SenderResolver,
        quotes: QuoteRepositoryBox,
    ) -> Self {
        Self {
            email_sender,
            config,
            senders,
            quotes,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub async fn notify(&self, increment_id: &str, error_message: &str, space: NotificationSpace) {
        if !self.config.enabled {
            return;
        }

        let recipient = match self.senders.resolve(&self.config.recipient) {
            Ok(mailbox) => mailbox.email,
            Err(e) => {
                error!(increment_id, %space, "Cannot resolve notification recipient: {}", e);
                return;
            }
        };

        let vars = self.variables(increment_id, error_message, space).await;
        self.email_sender
            .send_email(
                &self.config.email_template,
                0,
                &self.config.sender,
                &recipient,
                vars,
                Some(TemplateOptions::adminhtml()),
            )
            .await;
    }

    async fn variables(
        &self,
        increment_id: &str,
        error_message: &str,
        space: NotificationSpace,
    ) -> TemplateVars {
        let quote = match self.quotes.quote_by_reserved_order_id(increment_id).await {
            Ok(Some(quote)) => Some(quote),
            Ok(None) => {
                warn!(increment_id, "No quote found for reserved order id");
                None
            }
            Err(e) => {
                warn!(increment_id, "Failed to load quote: {}", e);
                None
            }
        };

        let mut vars = TemplateVars::new();
        vars.insert(
            "store_id".to_string(),
            quote.as_ref().map(|q| q.store_id.to_string()).unwrap_or_default(),
        );
        vars.insert("reserved_order_id".to_string(), increment_id.to_string());
        vars.insert(
            "wl_payment_id".to_string(),
            quote
                .as_ref()
                .and_then(|q| q.payment_id.clone())
                .unwrap_or_default(),
        );
        vars.insert(
            "customer_email".to_string(),
            quote
                .as_ref()
                .and_then(|q| q.customer_email.clone())
                .unwrap_or_default(),
        );
        vars.insert("date".to_string(), Utc::now().format(DATE_FORMAT).to_string());
        vars.insert("error_message".to_string(), error_message.to_string());
        vars.insert("space".to_string(), space.to_string());
        vars
    }
}
