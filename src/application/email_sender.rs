use crate::config::{OrderSynchronizationConfig, SenderResolver};
use crate::domain::email::{EmailBody, EmailMessage, Mailbox, TemplateOptions, TemplateVars};
use crate::domain::order::QuoteSummary;
use crate::domain::ports::{InlineTranslation, MailTransportBox};
use crate::error::Result;
use std::sync::Arc;
use tracing::error;

const FEATURE_REQUEST_SUBJECT: &str = "Request a new feature";

/// Keeps inline translation suspended until dropped.
struct SuspendedTranslation<'a>(&'a dyn InlineTranslation);

impl<'a> SuspendedTranslation<'a> {
    fn new(translation: &'a dyn InlineTranslation) -> Self {
        translation.suspend();
        Self(translation)
    }
}

impl Drop for SuspendedTranslation<'_> {
    fn drop(&mut self) {
        self.0.resume();
    }
}

/// Best-effort e-mail dispatch. Failures are logged and never returned.
pub struct EmailSender {
    transport: MailTransportBox,
    translation: Arc<dyn InlineTranslation>,
    senders: SenderResolver,
    synchronization: OrderSynchronizationConfig,
}

impl EmailSender {
    pub fn new(
        transport: MailTransportBox,
        translation: Arc<dyn InlineTranslation>,
        senders: SenderResolver,
        synchronization: OrderSynchronizationConfig,
    ) -> Self {
        Self {
            transport,
            translation,
            senders,
            synchronization,
        }
    }

    /// Tells the customer their payment was refused.
    ///
    /// Returns `false` without sending when the quote has no customer e-mail.
    pub async fn send_payment_refused_email(&self, quote: &QuoteSummary) -> bool {
        let Some(send_to) = quote.customer_email.as_deref().filter(|email| !email.is_empty())
        else {
            return false;
        };

        let store_id = quote.store_id;
        let send_from = self.synchronization.refused_payment_sender(store_id);
        let template = self.synchronization.refused_payment_template(store_id);

        self.send_email(
            template,
            store_id,
            send_from,
            send_to,
            TemplateVars::new(),
            None,
        )
        .await
    }

    /// Sends a templated e-mail from the given sender identity.
    ///
    /// Options default to the frontend area of `store_id`.
    pub async fn send_email(
        &self,
        template: &str,
        store_id: u32,
        send_from: &str,
        send_to: &str,
        vars: TemplateVars,
        options: Option<TemplateOptions>,
    ) -> bool {
        let options = options.unwrap_or_else(|| TemplateOptions::frontend(store_id));
        let _suspended = SuspendedTranslation::new(self.translation.as_ref());

        match self
            .try_send_template(template, send_from, send_to, vars, options)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(template, send_to, "Failed to send email: {}", e);
                false
            }
        }
    }

    async fn try_send_template(
        &self,
        template: &str,
        send_from: &str,
        send_to: &str,
        vars: TemplateVars,
        options: TemplateOptions,
    ) -> Result<()> {
        let from = self.senders.resolve(send_from)?;
        let message = EmailMessage {
            from,
            to: send_to.to_string(),
            body: EmailBody::Template {
                identifier: template.to_string(),
                options,
                vars,
            },
        };
        self.transport.send(message).await
    }

    /// Plain text fallback that bypasses the template engine.
    pub async fn send_email_without_template(
        &self,
        body: &str,
        from: &str,
        user_name: &str,
        add_to: &str,
    ) {
        let message = EmailMessage {
            from: Mailbox {
                name: Some(user_name.to_string()),
                email: from.to_string(),
            },
            to: add_to.to_string(),
            body: EmailBody::Text {
                subject: FEATURE_REQUEST_SUBJECT.to_string(),
                body: body.to_string(),
            },
        };

        if let Err(e) = self.transport.send(message).await {
            error!(add_to, "Failed to send plain text email: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SenderIdentity;
    use crate::domain::email::Area;
    use crate::domain::ports::MailTransport;
    use crate::infrastructure::in_memory::InMemoryMailTransport;
    use crate::infrastructure::mail::InlineTranslationState;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn resolver() -> SenderResolver {
        let mut identities = HashMap::new();
        identities.insert(
            "general".to_string(),
            SenderIdentity {
                name: "Store Owner".to_string(),
                email: "owner@example.com".to_string(),
            },
        );
        SenderResolver::new(identities)
    }

    fn sender(
        transport: InMemoryMailTransport,
        translation: Arc<InlineTranslationState>,
    ) -> EmailSender {
        EmailSender::new(
            Box::new(transport),
            translation,
            resolver(),
            OrderSynchronizationConfig::default(),
        )
    }

    /// Captures the translation state seen while the message is sent.
    struct ObservingTransport {
        translation: Arc<InlineTranslationState>,
        seen: Arc<Mutex<Vec<bool>>>,
    }

    #[async_trait]
    impl MailTransport for ObservingTransport {
        async fn send(&self, _message: EmailMessage) -> Result<()> {
            self.seen.lock().unwrap().push(self.translation.is_enabled());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_translation_suspended_while_sending() {
        let translation = Arc::new(InlineTranslationState::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let transport = ObservingTransport {
            translation: translation.clone(),
            seen: seen.clone(),
        };
        let sender = EmailSender::new(
            Box::new(transport),
            translation.clone(),
            resolver(),
            OrderSynchronizationConfig::default(),
        );

        let sent = sender
            .send_email("tpl", 1, "general", "a@example.com", TemplateVars::new(), None)
            .await;

        assert!(sent);
        assert_eq!(*seen.lock().unwrap(), vec![false]);
        assert!(translation.is_enabled());
    }

    #[tokio::test]
    async fn test_failure_is_swallowed_and_translation_resumed() {
        let translation = Arc::new(InlineTranslationState::default());
        let sender = sender(InMemoryMailTransport::failing(), translation.clone());

        let sent = sender
            .send_email("tpl", 1, "general", "a@example.com", TemplateVars::new(), None)
            .await;

        assert!(!sent);
        assert!(translation.is_enabled());
    }

    #[tokio::test]
    async fn test_unknown_sender_identity() {
        let transport = InMemoryMailTransport::new();
        let translation = Arc::new(InlineTranslationState::default());
        let sender = sender(transport.clone(), translation.clone());

        let sent = sender
            .send_email("tpl", 1, "nobody", "a@example.com", TemplateVars::new(), None)
            .await;

        assert!(!sent);
        assert!(transport.sent().await.is_empty());
        assert!(translation.is_enabled());
    }

    #[tokio::test]
    async fn test_default_options_use_frontend_store() {
        let transport = InMemoryMailTransport::new();
        let sender = sender(transport.clone(), Arc::new(InlineTranslationState::default()));

        sender
            .send_email("tpl", 3, "general", "a@example.com", TemplateVars::new(), None)
            .await;

        let sent = transport.sent().await;
        let EmailBody::Template { options, .. } = &sent[0].body else {
            panic!("expected a templated email");
        };
        assert_eq!(options.area, Area::Frontend);
        assert_eq!(options.store, 3);
    }

    #[tokio::test]
    async fn test_refused_payment_email_requires_customer_email() {
        let transport = InMemoryMailTransport::new();
        let sender = sender(transport.clone(), Arc::new(InlineTranslationState::default()));

        let quote = QuoteSummary {
            reserved_order_id: "000000001".to_string(),
            store_id: 1,
            customer_email: None,
            payment_id: None,
        };
        assert!(!sender.send_payment_refused_email(&quote).await);

        let quote = QuoteSummary {
            customer_email: Some("customer@example.com".to_string()),
            ..quote
        };
        assert!(sender.send_payment_refused_email(&quote).await);

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "customer@example.com");
        assert_eq!(sent[0].from.email, "owner@example.com");
    }

    #[tokio::test]
    async fn test_plain_text_email() {
        let transport = InMemoryMailTransport::new();
        let sender = sender(transport.clone(), Arc::new(InlineTranslationState::default()));

        sender
            .send_email_without_template(
                "Please add Twint",
                "merchant@example.com",
                "Merchant",
                "support@example.com",
            )
            .await;

        let sent = transport.sent().await;
        assert_eq!(
            sent[0].body,
            EmailBody::Text {
                subject: "Request a new feature".to_string(),
                body: "Please add Twint".to_string(),
            }
        );
        assert_eq!(sent[0].from.name.as_deref(), Some("Merchant"));
    }

    #[tokio::test]
    async fn test_plain_text_failure_is_swallowed() {
        let sender = sender(
            InMemoryMailTransport::failing(),
            Arc::new(InlineTranslationState::default()),
        );

        // Must not panic or propagate.
        sender
            .send_email_without_template("body", "a@example.com", "A", "b@example.com")
            .await;
    }
}
