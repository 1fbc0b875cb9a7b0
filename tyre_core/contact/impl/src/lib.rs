use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use tracing::{debug, info, warn};
use tyre_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitRequest, ContactSubmitResult,
};
use tyre_email_contracts::EmailService;
use tyre_models::{
    contact::{
        ContactMessageAuthor, ContactMessageContent, ContactMessageEmail, ContactMessageMobile,
        ContactMessageName, NewContactMessage,
    },
    email_address::EmailAddress,
};
use tyre_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use tyre_shared_contracts::time::TimeService;
use tyre_utils::trace_instrument;

pub use notification::NotificationOutcome;

mod notification;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Db, Time, ContactRepo, Email> {
    db: Db,
    time: Time,
    contact_repo: ContactRepo,
    /// `None` if no smtp relay is configured.
    email: Option<Email>,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Recipient of notification emails. Notifications are disabled if
    /// `None`.
    pub recipient: Option<Arc<EmailAddress>>,
    /// Upper bound for delivering a single notification.
    pub notification_timeout: Duration,
}

impl<Db, Time, ContactRepo, Email> ContactFeatureServiceImpl<Db, Time, ContactRepo, Email> {
    pub fn new(
        db: Db,
        time: Time,
        contact_repo: ContactRepo,
        email: Option<Email>,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            db,
            time,
            contact_repo,
            email,
            config,
        }
    }
}

impl<Db, Time, ContactRepo, EmailS> ContactFeatureService
    for ContactFeatureServiceImpl<Db, Time, ContactRepo, EmailS>
where
    Db: Database,
    Time: TimeService,
    ContactRepo: ContactRepository<Db::Transaction>,
    EmailS: EmailService,
{
    #[trace_instrument(skip(self, request))]
    async fn submit(
        &self,
        request: ContactSubmitRequest,
    ) -> Result<ContactSubmitResult, ContactSubmitError> {
        let (author, content) = validate(request).inspect_err(|err| debug!("rejected: {err}"))?;

        let message = NewContactMessage {
            author,
            content,
            created_at: self.time.now(),
        };

        let mut txn = self.db.begin_transaction().await?;

        let inserted = self
            .contact_repo
            .create(&mut txn, &message)
            .await
            .context("Failed to save contact message")?;
        if inserted.rows_affected != 1 {
            return Err(anyhow!(
                "Expected to insert exactly one contact message, inserted {}",
                inserted.rows_affected
            )
            .into());
        }

        txn.commit().await?;

        let notification = self.notify(&message).await;
        info!(id = %inserted.id, ?notification, "saved contact message");

        Ok(ContactSubmitResult {
            id: inserted.id,
            saved: true,
            email_sent: notification.is_sent(),
        })
    }
}

impl<Db, Time, ContactRepo, EmailS> ContactFeatureServiceImpl<Db, Time, ContactRepo, EmailS>
where
    EmailS: EmailService,
{
    /// Never fails, the message has already been saved at this point.
    async fn notify(&self, message: &NewContactMessage) -> NotificationOutcome {
        let (Some(email_service), Some(recipient)) = (&self.email, &self.config.recipient) else {
            return NotificationOutcome::Disabled;
        };

        let email = notification::build_email(recipient, message);
        let timeout = self.config.notification_timeout;

        match tokio::time::timeout(timeout, email_service.send(email)).await {
            Ok(Ok(true)) => NotificationOutcome::Sent,
            Ok(Ok(false)) => {
                warn!("Smtp server rejected contact notification");
                NotificationOutcome::Rejected
            }
            Ok(Err(err)) => {
                warn!("Failed to send contact notification: {err:#}");
                NotificationOutcome::Failed
            }
            Err(_) => {
                warn!(?timeout, "Sending contact notification timed out");
                NotificationOutcome::TimedOut
            }
        }
    }
}

fn validate(
    request: ContactSubmitRequest,
) -> Result<(ContactMessageAuthor, ContactMessageContent), ContactSubmitError> {
    let ContactSubmitRequest {
        name,
        mobile,
        email,
        message,
    } = request;

    let name = ContactMessageName::try_new(name).map_err(|_| ContactSubmitError::InvalidName)?;
    let mobile =
        ContactMessageMobile::try_new(mobile).map_err(|_| ContactSubmitError::InvalidMobile)?;
    let email =
        ContactMessageEmail::try_new(email).map_err(|_| ContactSubmitError::InvalidEmail)?;
    let content =
        ContactMessageContent::try_new(message).map_err(|_| ContactSubmitError::InvalidMessage)?;

    Ok((
        ContactMessageAuthor {
            name,
            mobile,
            email,
        },
        content,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tyre_demo::contact::NEW_JO;
    use tyre_email_contracts::{ContentType, Email, MockEmailService};
    use tyre_persistence_contracts::{
        contact::{InsertedRow, MockContactRepository},
        MockDatabase, MockTransaction,
    };
    use tyre_shared_contracts::time::MockTimeService;
    use tyre_utils::assert_matches;

    use super::*;

    type Sut = ContactFeatureServiceImpl<
        MockDatabase,
        MockTimeService,
        MockContactRepository<MockTransaction>,
        MockEmailService,
    >;

    fn config(recipient: Option<&str>) -> ContactFeatureConfig {
        ContactFeatureConfig {
            recipient: recipient.map(|x| Arc::new(x.parse().unwrap())),
            notification_timeout: Duration::from_secs(15),
        }
    }

    fn request(message: &NewContactMessage) -> ContactSubmitRequest {
        ContactSubmitRequest {
            name: format!("  {}  ", message.author.name),
            mobile: format!("{}\n", message.author.mobile),
            email: format!("\t{}", message.author.email),
            message: message.content.to_string(),
        }
    }

    fn jo_notification() -> Email {
        Email {
            recipient: "office@tyre.local".parse().unwrap(),
            subject: "New Contact Message — Jo".into(),
            body: "New message received:\n\nName: Jo\nMobile: 12345678\nEmail: \
                   jo@example.com\nTime: 2024-06-01T09:15:00.000Z\n\nMessage:\nHi there\n"
                .into(),
            content_type: ContentType::Text,
            reply_to: Some("jo@example.com".parse().unwrap()),
        }
    }

    fn sut_saving_jo(email: Option<MockEmailService>, config: ContactFeatureConfig) -> Sut {
        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(NEW_JO.created_at);
        let contact_repo = MockContactRepository::new().with_create(
            NEW_JO.clone(),
            InsertedRow {
                id: 1.into(),
                rows_affected: 1,
            },
        );

        ContactFeatureServiceImpl {
            db,
            time,
            contact_repo,
            email,
            config,
        }
    }

    fn sut_rejecting() -> Sut {
        ContactFeatureServiceImpl {
            db: MockDatabase::new(),
            time: MockTimeService::new(),
            contact_repo: MockContactRepository::new(),
            email: Some(MockEmailService::new()),
            config: config(Some("office@tyre.local")),
        }
    }

    #[tokio::test]
    async fn ok_notifications_disabled() {
        // Arrange
        let sut = sut_saving_jo(None, config(None));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitResult {
                id: 1.into(),
                saved: true,
                email_sent: false,
            }
        );
    }

    #[tokio::test]
    async fn ok_email_configured_without_recipient() {
        // Arrange
        let sut = sut_saving_jo(Some(MockEmailService::new()), config(None));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert!(!result.unwrap().email_sent);
    }

    #[tokio::test]
    async fn ok_notification_sent() {
        // Arrange
        let email = MockEmailService::new().with_send(jo_notification(), true);
        let sut = sut_saving_jo(Some(email), config(Some("office@tyre.local")));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitResult {
                id: 1.into(),
                saved: true,
                email_sent: true,
            }
        );
    }

    #[tokio::test]
    async fn ok_notification_rejected() {
        // Arrange
        let email = MockEmailService::new().with_send(jo_notification(), false);
        let sut = sut_saving_jo(Some(email), config(Some("office@tyre.local")));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        let result = result.unwrap();
        assert!(result.saved);
        assert!(!result.email_sent);
    }

    #[tokio::test]
    async fn ok_notification_failed() {
        // Arrange
        let email = MockEmailService::new().with_send_error(jo_notification());
        let sut = sut_saving_jo(Some(email), config(Some("office@tyre.local")));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitResult {
                id: 1.into(),
                saved: true,
                email_sent: false,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ok_notification_timed_out() {
        // Arrange
        let email = MockEmailService::new().with_send_hanging(jo_notification());
        let sut = sut_saving_jo(Some(email), config(Some("office@tyre.local")));

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        let result = result.unwrap();
        assert!(result.saved);
        assert!(!result.email_sent);
    }

    #[tokio::test]
    async fn ok_unparsable_reply_to() {
        // Arrange
        let mut message = NEW_JO.clone();
        message.author.email = ContactMessageEmail::try_new("jo@@example").unwrap();

        let db = MockDatabase::build(true);
        let time = MockTimeService::new().with_now(message.created_at);
        let contact_repo = MockContactRepository::new().with_create(
            message.clone(),
            InsertedRow {
                id: 7.into(),
                rows_affected: 1,
            },
        );
        let email = MockEmailService::new().with_send(
            Email {
                body: jo_notification()
                    .body
                    .replace("jo@example.com", "jo@@example"),
                reply_to: None,
                ..jo_notification()
            },
            true,
        );

        let sut: Sut = ContactFeatureServiceImpl {
            db,
            time,
            contact_repo,
            email: Some(email),
            config: config(Some("office@tyre.local")),
        };

        // Act
        let result = sut.submit(request(&message)).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitResult {
                id: 7.into(),
                saved: true,
                email_sent: true,
            }
        );
    }

    #[tokio::test]
    async fn invalid_name() {
        for name in ["", "   ", "J", " J "] {
            // Arrange
            let sut = sut_rejecting();

            // Act
            let result = sut
                .submit(ContactSubmitRequest {
                    name: name.into(),
                    ..request(&NEW_JO)
                })
                .await;

            // Assert
            assert_matches!(result, Err(ContactSubmitError::InvalidName));
        }
    }

    #[tokio::test]
    async fn invalid_mobile() {
        for mobile in ["", "12345", "  12345  "] {
            // Arrange
            let sut = sut_rejecting();

            // Act
            let result = sut
                .submit(ContactSubmitRequest {
                    mobile: mobile.into(),
                    ..request(&NEW_JO)
                })
                .await;

            // Assert
            assert_matches!(result, Err(ContactSubmitError::InvalidMobile));
        }
    }

    #[tokio::test]
    async fn invalid_email() {
        for email in ["", "not-an-email", "a@b", " a@b "] {
            // Arrange
            let sut = sut_rejecting();

            // Act
            let result = sut
                .submit(ContactSubmitRequest {
                    email: email.into(),
                    ..request(&NEW_JO)
                })
                .await;

            // Assert
            assert_matches!(result, Err(ContactSubmitError::InvalidEmail));
        }
    }

    #[tokio::test]
    async fn invalid_message() {
        for message in ["", "Hi", " Hi "] {
            // Arrange
            let sut = sut_rejecting();

            // Act
            let result = sut
                .submit(ContactSubmitRequest {
                    message: message.into(),
                    ..request(&NEW_JO)
                })
                .await;

            // Assert
            assert_matches!(result, Err(ContactSubmitError::InvalidMessage));
        }
    }

    #[tokio::test]
    async fn first_invalid_field_is_reported() {
        // Arrange
        let sut = sut_rejecting();

        // Act
        let result = sut
            .submit(ContactSubmitRequest {
                name: String::new(),
                mobile: "1".into(),
                email: "x".into(),
                message: String::new(),
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::InvalidName));

        // Arrange
        let sut = sut_rejecting();

        // Act
        let result = sut
            .submit(ContactSubmitRequest {
                email: "x".into(),
                message: String::new(),
                ..request(&NEW_JO)
            })
            .await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::InvalidEmail));
    }

    #[tokio::test]
    async fn save_failed() {
        // Arrange
        let db = MockDatabase::build(false);
        let time = MockTimeService::new().with_now(NEW_JO.created_at);
        let contact_repo = MockContactRepository::new().with_create_error(NEW_JO.clone());

        let sut: Sut = ContactFeatureServiceImpl {
            db,
            time,
            contact_repo,
            email: Some(MockEmailService::new()),
            config: config(Some("office@tyre.local")),
        };

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Other(_)));
    }

    #[tokio::test]
    async fn database_unavailable() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::new().with_begin_transaction_error("unable to open database file"),
            time: MockTimeService::new().with_now(NEW_JO.created_at),
            contact_repo: MockContactRepository::new(),
            email: None,
            config: config(None),
        };

        // Act
        let result = sut.submit(request(&NEW_JO)).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Other(err)) if err.to_string().contains("unable to open"));
    }
}
