use anyhow::Context;
use tracing::info;
use tyre_config::{ContactConfig, SmtpConfig};
use tyre_email_impl::{EmailServiceImpl, SmtpSettings};

/// Creates the smtp client. Returns `None` if the smtp relay is not fully
/// configured.
pub fn connect(
    smtp: &SmtpConfig,
    contact: &ContactConfig,
) -> anyhow::Result<Option<EmailServiceImpl>> {
    if !smtp.is_complete() {
        info!("SMTP is not configured, email notifications are disabled");
        return Ok(None);
    }

    EmailServiceImpl::new(
        &SmtpSettings {
            host: smtp.host.clone(),
            port: smtp.port,
            secure: smtp.secure,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            timeout: smtp.timeout.into(),
        },
        contact.from.clone(),
    )
    .map(Some)
    .context("Failed to create SMTP client")
}
