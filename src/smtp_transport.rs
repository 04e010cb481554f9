//! src/smtp_transport.rs

use std::time::Duration;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, Secret};

use crate::domain::ContactEmail;
use crate::email_client::{MailTransport, OutgoingEmail};

/// Delivers mail through an authenticated SMTP relay (e.g. `smtp.gmail.com`).
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(
        relay: &str,
        username: String,
        password: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, lettre::transport::smtp::Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)?
            .credentials(Credentials::new(
                username,
                password.expose_secret().to_owned(),
            ))
            .timeout(Some(timeout))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailTransport {
    #[tracing::instrument(name = "Sending an email through the SMTP relay", skip(self, email))]
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), anyhow::Error> {
        let message = build_message(email)?;
        self.transport
            .send(message)
            .await
            .context("The SMTP relay rejected the email")?;
        Ok(())
    }
}

fn build_message(email: &OutgoingEmail) -> Result<Message, anyhow::Error> {
    Message::builder()
        .from(mailbox(&email.from)?)
        .to(mailbox(&email.to)?)
        .reply_to(mailbox(&email.reply_to)?)
        .subject(email.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            email.text_body.clone(),
            email.html_body.clone(),
        ))
        .context("Failed to build the email message")
}

fn mailbox(address: &ContactEmail) -> Result<Mailbox, anyhow::Error> {
    address
        .as_ref()
        .parse::<Mailbox>()
        .with_context(|| format!("{} is not a deliverable mailbox", address))
}
