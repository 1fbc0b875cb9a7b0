use std::time::Duration;

use anyhow::anyhow;
use lettre::{
    message::{header, MessageBuilder},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tyre_email_contracts::{ContentType, Email, EmailService};
use tyre_models::email_address::EmailAddress;
use tyre_utils::{trace_instrument, Apply};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

/// Connection settings of the smtp relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Use implicit TLS. Otherwise the connection starts in plain text and is
    /// upgraded using STARTTLS if the server offers it.
    pub secure: bool,
    pub username: String,
    pub password: String,
    /// Applies to each smtp command, not to the delivery as a whole.
    pub timeout: Duration,
}

impl EmailServiceImpl {
    pub fn new(settings: &SmtpSettings, from: EmailAddress) -> anyhow::Result<Self> {
        let tls_parameters = TlsParameters::new(settings.host.clone())?;
        let tls = if settings.secure {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        Ok(Self { from, transport })
    }
}

impl EmailService for EmailServiceImpl {
    #[trace_instrument(skip(self, email), fields(recipient = %email.recipient, subject = %email.subject))]
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = build_message(&self.from, email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(from: &EmailAddress, email: Email) -> anyhow::Result<Message> {
    Message::builder()
        .from(from.clone().into())
        .to(email.recipient.into())
        .apply_map(email.reply_to.map(Into::into), MessageBuilder::reply_to)
        .subject(email.subject)
        .header(match email.content_type {
            ContentType::Text => header::ContentType::TEXT_PLAIN,
            ContentType::Html => header::ContentType::TEXT_HTML,
        })
        .body(email.body)
        .map_err(Into::into)
}
