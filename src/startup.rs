//! src/startup.rs

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configurations::{Settings, TransportKind};
use crate::email_client::{EmailClient, MailTransport};
use crate::mailer::ContactMailer;
use crate::routes::{contact, health_check, json_error_handler};
use crate::smtp_transport::SmtpMailTransport;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let mailer = build_mailer(&configuration)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        // Port 0 asks the OS for a free port; `port()` reports the real one.
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind {}", address))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, mailer)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Builds the mail relay once for the whole process. Missing credentials
/// leave the relay disabled rather than failing startup.
pub fn build_mailer(configuration: &Settings) -> Result<Option<ContactMailer>, anyhow::Error> {
    let credentials = match configuration.contact.credentials() {
        Ok(credentials) => credentials,
        Err(reason) => {
            tracing::warn!(
                reason = %reason,
                "Contact form email environment variables are not fully configured."
            );
            return Ok(None);
        }
    };

    let settings = &configuration.email_client;
    let transport: Arc<dyn MailTransport> = match settings.transport {
        TransportKind::Smtp => Arc::new(
            SmtpMailTransport::new(
                &settings.smtp_host,
                credentials.sender.as_ref().to_owned(),
                credentials.password,
                settings.timeout(),
            )
            .context("Failed to set up the SMTP transport")?,
        ),
        TransportKind::Http => Arc::new(
            EmailClient::new(
                settings.base_url.clone(),
                credentials.password,
                settings.timeout(),
            )
            .context("Failed to set up the HTTP email client")?,
        ),
    };

    Ok(Some(ContactMailer::new(
        transport,
        credentials.sender,
        credentials.recipient,
    )))
}

/// Request bodies above this size are rejected before validation.
const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Returns the server without awaiting it; the caller decides whether to
/// drive it in the foreground or spawn it (tests bind port 0 and spawn).
pub fn run(
    listener: TcpListener,
    mailer: Option<ContactMailer>,
) -> Result<Server, std::io::Error> {
    // `web::Data` is an `Arc`: every worker shares the one mailer.
    let mailer = web::Data::new(mailer);
    // The closure runs once per worker thread, so it must only clone.
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_BODY_LIMIT)
                    .error_handler(json_error_handler),
            )
            .route("/health_check", web::get().to(health_check))
            .route("/api/contact", web::post().to(contact))
            .app_data(mailer.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
