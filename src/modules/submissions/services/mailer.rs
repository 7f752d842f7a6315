use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;
use crate::core::{AppError, Result};

/// Plain-text notification for the business inbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Display name of the sender; the address is always the relay account
    pub from_name: String,
    pub subject: String,
    pub body: String,
    /// Submitter's address, when they gave a usable one
    pub reply_to: Option<String>,
}

/// Outbound email relay
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message. Failures are reported, never retried.
    async fn send(&self, message: EmailMessage) -> Result<()>;
}

/// SMTP relay over STARTTLS
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Address,
    to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let from_address: Address = config.user.parse().map_err(|e| {
            AppError::Configuration(format!("EMAIL_USER is not an email address: {}", e))
        })?;
        let to: Mailbox = config
            .to
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid EMAIL_TO: {}", e)))?;

        let creds = Credentials::new(config.user.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| {
                AppError::Configuration(format!("Failed to create SMTP relay: {}", e))
            })?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            from_address,
            to,
        })
    }

    fn build(&self, message: &EmailMessage) -> Result<Message> {
        let from = Mailbox::new(Some(message.from_name.clone()), self.from_address.clone());

        let mut builder = Message::builder()
            .from(from)
            .to(self.to.clone())
            .subject(&message.subject);

        if let Some(reply_to) = &message.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => tracing::debug!(error = %e, "Ignoring unusable reply-to address"),
            }
        }

        builder
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| AppError::mail(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        let email = self.build(&message)?;

        self.transport.send(email).await.map_err(|e| {
            tracing::error!(subject = %message.subject, error = %e, "Email relay failed");
            AppError::mail("Could not deliver the notification email")
        })?;

        tracing::info!(subject = %message.subject, "Notification email sent");

        Ok(())
    }
}
