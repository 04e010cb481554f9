//! src/email_client.rs

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::ContactEmail;

/// A fully composed email, ready to hand over to a [`MailTransport`].
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub from: ContactEmail,
    pub to: ContactEmail,
    pub reply_to: ContactEmail,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Delivers a single email. Implementations are built once at startup and
/// shared read-only between workers.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), anyhow::Error>;
}

/// Client for an HTTP email API (`POST {base_url}/email`, authenticated by
/// a server token header).
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl MailTransport for EmailClient {
    #[tracing::instrument(name = "Sending an email through the HTTP API", skip(self, email))]
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), anyhow::Error> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: email.from.as_ref(),
            to: email.to.as_ref(),
            reply_to: email.reply_to.as_ref(),
            subject: &email.subject,
            html_body: &email.html_body,
            text_body: &email.text_body,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
