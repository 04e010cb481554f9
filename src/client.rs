//! src/client.rs
//!
//! The contact form as seen from the browser side: three text fields, a
//! submission status and the call to `POST /api/contact`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reqwest::Client;

pub const FALLBACK_SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Pending,
    Success(String),
    Error(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    /// The server answered, but not with `success: true`.
    #[error("{}", .0.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Rejected(Option<String>),
    #[error("Failed to send message. Please try again later.")]
    Transport(#[from] reqwest::Error),
}

#[derive(serde::Serialize)]
struct ContactPayload<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(serde::Deserialize)]
struct ServerReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Posts contact submissions to a running contact service.
#[derive(Clone)]
pub struct ContactClient {
    http_client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        }
    }

    /// One POST, no retry. A non-2xx status and a 2xx reply without
    /// `success: true` are both failures carrying the server's message.
    #[tracing::instrument(name = "Submitting the contact form", skip(self, name, email, message))]
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<String, SubmitError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&ContactPayload {
                name,
                email,
                message,
            })
            .send()
            .await?;
        let status = response.status();
        let reply: ServerReply = response.json().await?;

        if status.is_success() && reply.success == Some(true) {
            Ok(reply
                .message
                .unwrap_or_else(|| FALLBACK_SUCCESS_MESSAGE.to_string()))
        } else {
            Err(SubmitError::Rejected(
                reply.message.filter(|m| !m.is_empty()),
            ))
        }
    }
}

/// Shared view of whether a form has a submission in flight. A UI holds a
/// clone to disable its submit control while the form itself is busy.
#[derive(Debug, Clone, Default)]
pub struct PendingFlag(Arc<AtomicBool>);

impl PendingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn set(&self, value: bool) {
        self.0.store(value, Ordering::Release);
    }
}

/// Local state of the contact form.
#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    pending: PendingFlag,
    outcome: Option<Result<String, String>>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editing any field hides the result of the previous submission.
    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
        self.outcome = None;
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_set()
    }

    pub fn pending_flag(&self) -> PendingFlag {
        self.pending.clone()
    }

    pub fn status(&self) -> SubmitStatus {
        if self.is_pending() {
            return SubmitStatus::Pending;
        }
        match &self.outcome {
            None => SubmitStatus::Idle,
            Some(Ok(message)) => SubmitStatus::Success(message.clone()),
            Some(Err(message)) => SubmitStatus::Error(message.clone()),
        }
    }

    /// Sends the form once. The `&mut` receiver rules out a second submit of
    /// the same form while one is in flight. The pending flag is cleared on
    /// every exit, including when the returned future is dropped early.
    pub async fn submit(&mut self, client: &ContactClient) {
        let _pending = PendingGuard::engage(self.pending.clone());
        self.outcome = None;

        let outcome = client
            .submit(&self.name, &self.email, &self.message)
            .await;

        match outcome {
            Ok(message) => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.outcome = Some(Ok(message));
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Contact form submission failed");
                self.outcome = Some(Err(e.to_string()));
            }
        }
    }
}

struct PendingGuard(PendingFlag);

impl PendingGuard {
    fn engage(flag: PendingFlag) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
