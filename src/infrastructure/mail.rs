use crate::domain::email::{EmailBody, EmailMessage};
use crate::domain::ports::{InlineTranslation, MailTransport};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Transport that writes outgoing messages to the log instead of delivering them.
///
/// Used by the CLI, where no mail server is configured.
#[derive(Default, Clone)]
pub struct LogMailTransport;

impl LogMailTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        match &message.body {
            EmailBody::Template {
                identifier,
                options,
                vars,
            } => info!(
                from = %message.from.email,
                to = %message.to,
                template = %identifier,
                store = options.store,
                vars = ?vars,
                "Templated email"
            ),
            EmailBody::Text { subject, .. } => info!(
                from = %message.from.email,
                to = %message.to,
                subject = %subject,
                "Plain text email"
            ),
        }
        Ok(())
    }
}

/// Process-wide inline translation switch.
#[derive(Debug)]
pub struct InlineTranslationState {
    enabled: AtomicBool,
}

impl InlineTranslationState {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }
}

impl Default for InlineTranslationState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InlineTranslation for InlineTranslationState {
    fn suspend(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::email::{Mailbox, TemplateOptions, TemplateVars};

    #[test]
    fn test_translation_toggle() {
        let state = InlineTranslationState::default();
        assert!(state.is_enabled());
        state.suspend();
        assert!(!state.is_enabled());
        state.resume();
        assert!(state.is_enabled());
    }

    #[tokio::test]
    async fn test_log_transport_accepts_messages() {
        let transport = LogMailTransport::new();
        let message = EmailMessage {
            from: Mailbox {
                name: None,
                email: "owner@example.com".to_string(),
            },
            to: "customer@example.com".to_string(),
            body: EmailBody::Template {
                identifier: "worldline_payment_refused".to_string(),
                options: TemplateOptions::frontend(1),
                vars: TemplateVars::new(),
            },
        };

        assert!(transport.send(message).await.is_ok());
    }
}
