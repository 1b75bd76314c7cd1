//! Webhook events pushed by Worldline.
//!
//! Signature verification and HTTP handling happen before an event reaches this
//! module; here an already trusted JSON body is decoded and routed to processors.

use crate::application::failed_order_notification::{
    FailedOrderCreationNotification, NotificationSpace,
};
use crate::application::reconciliation::TransactionResponseManager;
use crate::domain::response::{PaymentResponse, RefundResponse, WorldlineResponse};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

const REFUND_EVENT_PREFIX: &str = "refund.";

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub api_version: Option<String>,
    pub id: String,
    pub created: Option<String>,
    pub merchant_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: String,
    pub payment: Option<PaymentResponse>,
    pub refund: Option<RefundResponse>,
}

impl WebhookEvent {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn is_refund_event(&self) -> bool {
        self.event_type.starts_with(REFUND_EVENT_PREFIX)
    }

    /// The response this event reports on.
    ///
    /// `refund.*` events carry a refund section, every other event a payment
    /// section. A missing section is an invalid output model.
    pub fn response(&self) -> Result<WorldlineResponse> {
        let response = if self.is_refund_event() {
            self.refund.clone().map(WorldlineResponse::Refund)
        } else {
            self.payment.clone().map(WorldlineResponse::Payment)
        };
        response.ok_or(PaymentError::InvalidOutputModel)
    }

    /// Order increment id of the event, read from the section `response()`
    /// would pick and from the other section when that one is absent.
    pub fn merchant_reference(&self) -> Option<&str> {
        let payment = self
            .payment
            .as_ref()
            .map(|payment| payment.payment_output.references.merchant_reference.as_str());
        let refund = self
            .refund
            .as_ref()
            .map(|refund| refund.refund_output.references.merchant_reference.as_str());

        let reference = if self.is_refund_event() {
            refund.or(payment)
        } else {
            payment.or(refund)
        };
        reference.filter(|reference| !reference.is_empty())
    }
}

#[async_trait]
pub trait WebhookProcessor: Send + Sync {
    async fn process(&self, event: &WebhookEvent) -> Result<()>;
}

/// Records the event's payment or refund state in the transaction history.
pub struct TransactionWebhookProcessor {
    manager: Arc<TransactionResponseManager>,
}

impl TransactionWebhookProcessor {
    pub fn new(manager: Arc<TransactionResponseManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl WebhookProcessor for TransactionWebhookProcessor {
    async fn process(&self, event: &WebhookEvent) -> Result<()> {
        let response = event.response()?;
        let outcome = self.manager.save_transaction(&response).await?;
        debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            ?outcome,
            "Webhook processed"
        );
        Ok(())
    }
}

/// Runs every processor for an event, stopping at the first failure.
pub struct WebhookDispatcher {
    processors: Vec<Box<dyn WebhookProcessor>>,
    notification: Option<Arc<FailedOrderCreationNotification>>,
}

impl WebhookDispatcher {
    pub fn new(processors: Vec<Box<dyn WebhookProcessor>>) -> Self {
        Self {
            processors,
            notification: None,
        }
    }

    /// Alerts the merchant through this notification when processing fails.
    pub fn with_notification(
        mut self,
        notification: Arc<FailedOrderCreationNotification>,
    ) -> Self {
        self.notification = Some(notification);
        self
    }

    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<()> {
        for processor in &self.processors {
            if let Err(e) = processor.process(event).await {
                error!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "Webhook processing failed: {}",
                    e
                );
                self.report_failure(event, &e).await;
                return Err(e);
            }
        }
        Ok(())
    }

    async fn report_failure(&self, event: &WebhookEvent, e: &PaymentError) {
        let (Some(notification), Some(increment_id)) =
            (&self.notification, event.merchant_reference())
        else {
            return;
        };
        notification
            .notify(increment_id, &e.to_string(), NotificationSpace::Webhook)
            .await;
    }
}
