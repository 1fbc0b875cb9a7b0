use std::future::Future;

use thiserror::Error;
use tyre_models::contact::ContactMessageId;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates and stores a contact form submission, then notifies the
    /// configured recipient by email if notifications are enabled.
    ///
    /// Fields are validated in the order name, mobile, email, message and
    /// the first invalid field is reported.
    fn submit(
        &self,
        request: ContactSubmitRequest,
    ) -> impl Future<Output = Result<ContactSubmitResult, ContactSubmitError>> + Send;
}

/// Raw, untrimmed form fields. Absent fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmitRequest {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSubmitResult {
    pub id: ContactMessageId,
    /// Always `true`, a submission that could not be saved is an error.
    pub saved: bool,
    /// Whether the notification email was accepted by the smtp server.
    pub email_sent: bool,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Name is required.")]
    InvalidName,
    #[error("Mobile number is required.")]
    InvalidMobile,
    #[error("Valid email is required.")]
    InvalidEmail,
    #[error("Message is required.")]
    InvalidMessage,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        request: ContactSubmitRequest,
        result: Result<ContactSubmitResult, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
