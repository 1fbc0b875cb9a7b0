use chrono::SecondsFormat;
use tracing::warn;
use tyre_email_contracts::{ContentType, Email};
use tyre_models::{contact::NewContactMessage, email_address::EmailAddress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// No smtp relay or no recipient configured.
    Disabled,
    Sent,
    /// The smtp server answered with a negative reply.
    Rejected,
    Failed,
    TimedOut,
}

impl NotificationOutcome {
    pub fn is_sent(self) -> bool {
        self == Self::Sent
    }
}

pub(crate) fn build_email(recipient: &EmailAddress, message: &NewContactMessage) -> Email {
    let author = &message.author;

    let reply_to = author
        .email
        .parse::<EmailAddress>()
        .inspect_err(|err| {
            warn!(email = %author.email, "Omitting reply-to of contact notification: {err}")
        })
        .ok();

    Email {
        recipient: recipient.clone(),
        subject: format!("New Contact Message — {}", author.name),
        body: format!(
            "New message received:\n\nName: {}\nMobile: {}\nEmail: {}\nTime: {}\n\nMessage:\n{}\n",
            author.name,
            author.mobile,
            author.email,
            message
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            message.content,
        ),
        content_type: ContentType::Text,
        reply_to,
    }
}
