use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::{
    client::ContactSubmitter,
    form::ContactForm,
    i18n::{Language, TextKey},
};

/// How a submission is handled.
#[derive(Debug, Clone)]
pub enum SubmissionMode<C> {
    /// Send the form to the intake endpoint.
    Remote(C),
    /// Only check that the required fields are filled in, nothing leaves the
    /// page.
    LocalOnly,
}

/// Message shown below the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Ok,
    Error,
    Warning,
}

impl StatusKind {
    /// Css class of the status element.
    pub fn class(self) -> &'static str {
        match self {
            Self::Ok => "status ok",
            Self::Error => "status err",
            Self::Warning => "status warn",
        }
    }
}

impl FormStatus {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Drives the contact form and owns the state of its submit control.
#[derive(Debug)]
pub struct ContactFormController<C> {
    mode: SubmissionMode<C>,
    submit_enabled: AtomicBool,
}

impl<C: ContactSubmitter> ContactFormController<C> {
    pub fn new(mode: SubmissionMode<C>) -> Self {
        Self {
            mode,
            submit_enabled: AtomicBool::new(true),
        }
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled.load(Ordering::Acquire)
    }

    /// Handles a submission of `form`.
    ///
    /// Returns `None` without doing anything while another submission is in
    /// flight. The form is cleared only if the submission succeeded.
    pub async fn submit(&self, form: &mut ContactForm, language: Language) -> Option<FormStatus> {
        let _guard = self.disable_submit()?;

        let status = match &self.mode {
            SubmissionMode::Remote(client) => submit_remote(client, form, language).await,
            SubmissionMode::LocalOnly => submit_local(form, language),
        };
        Some(status)
    }

    fn disable_submit(&self) -> Option<SubmitGuard<'_>> {
        self.submit_enabled
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard(&self.submit_enabled))
    }
}

/// Re-enables the submit control when dropped.
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

async fn submit_remote(
    client: &impl ContactSubmitter,
    form: &mut ContactForm,
    language: Language,
) -> FormStatus {
    if let Err(err) = form.validate() {
        return FormStatus::new(StatusKind::Error, err.text_key().text(language));
    }

    match client.submit(form).await {
        Ok(receipt) => {
            debug!(?receipt, "contact form sent");
            form.reset();
            FormStatus::new(StatusKind::Ok, TextKey::Sent.text(language))
        }
        Err(err) => {
            debug!("contact form not sent: {err}");
            FormStatus::new(StatusKind::Error, err.user_message(language))
        }
    }
}

fn submit_local(form: &mut ContactForm, language: Language) -> FormStatus {
    if !form.missing_fields().is_empty() {
        return FormStatus::new(StatusKind::Warning, TextKey::FillRequired.text(language));
    }

    let text = TextKey::Received
        .text(language)
        .replace("{name}", form.trimmed("name"))
        .replace("{email}", form.trimmed("email"));
    form.reset();
    FormStatus::new(StatusKind::Ok, text)
}
