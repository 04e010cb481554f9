//! src/mailer.rs

use std::sync::Arc;

use crate::domain::{ContactEmail, ContactSubmission};
use crate::email_client::{MailTransport, OutgoingEmail};

/// Turns a contact submission into an email addressed to the site owner.
#[derive(Clone)]
pub struct ContactMailer {
    transport: Arc<dyn MailTransport>,
    sender: ContactEmail,
    recipient: ContactEmail,
}

impl ContactMailer {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        sender: ContactEmail,
        recipient: ContactEmail,
    ) -> Self {
        Self {
            transport,
            sender,
            recipient,
        }
    }

    pub fn compose(&self, submission: &ContactSubmission) -> OutgoingEmail {
        let name = submission.name.as_ref();
        let email = submission.email.as_ref();
        let message = submission.message.as_ref();

        let text_body = format!("Name: {}\nEmail: {}\n\n{}", name, email, message);
        let html_body = format!(
            "<p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{}</p>",
            escape_html(name),
            escape_html(email),
            escape_html(message).replace('\n', "<br />"),
        );

        OutgoingEmail {
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: submission.email.clone(),
            subject: format!("New portfolio contact from {}", name),
            html_body,
            text_body,
        }
    }

    #[tracing::instrument(name = "Relaying a contact submission by email", skip_all)]
    pub async fn relay(&self, submission: &ContactSubmission) -> Result<(), anyhow::Error> {
        let email = self.compose(submission);
        self.transport.send_email(&email).await
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
