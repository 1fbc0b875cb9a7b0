use std::future::Future;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{
    form::ContactForm,
    i18n::{Language, TextKey},
};

pub const CONTACT_PATH: &str = "/api/contact";

#[cfg_attr(test, mockall::automock)]
pub trait ContactSubmitter: Send + Sync + 'static {
    /// Sends the form to the intake endpoint.
    ///
    /// Returns `Ok(None)` if the server accepted the submission but its
    /// response could not be decoded.
    fn submit(
        &self,
        form: &ContactForm,
    ) -> impl Future<Output = Result<Option<ContactReceipt>, ClientError>> + Send;
}

/// Success envelope of `POST /api/contact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub ok: bool,
    pub id: i64,
    pub saved: bool,
    pub email_sent: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Server rejected the submission with status {status}")]
    Rejected {
        status: u16,
        /// Reason given by the server, if any.
        message: Option<String>,
    },
    #[error("Failed to reach the server: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Text shown below the form.
    pub fn user_message(&self, language: Language) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected { message: None, .. } => TextKey::SendFailed.text(language).into(),
            Self::Transport(_) => TextKey::SomethingWentWrong.text(language).into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ContactClient {
    /// Creates a client for the site at `base_url`.
    pub fn new(base_url: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: base_url.join(CONTACT_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ContactSubmitter for ContactClient {
    async fn submit(&self, form: &ContactForm) -> Result<Option<ContactReceipt>, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)
                .inspect_err(|err| debug!("undecodable contact response: {err}"))
                .ok());
        }

        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|body| body.error)
            .filter(|error| !error.is_empty());
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
