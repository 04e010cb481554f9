//! src/configurations.rs

use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::ContactEmail;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    #[serde(default)]
    pub contact: ContactSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Smtp,
    Http,
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub transport: TransportKind,
    pub smtp_host: String,
    pub base_url: String,
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Addresses and secret for the contact mail relay. Any of them may be
/// missing; the server still starts but refuses to send.
#[derive(serde::Deserialize, Clone, Default)]
pub struct ContactSettings {
    pub to: Option<String>,
    pub from: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug)]
pub struct MailCredentials {
    pub recipient: ContactEmail,
    pub sender: ContactEmail,
    pub password: Secret<String>,
}

impl ContactSettings {
    /// The sender falls back to the recipient when unset. Empty values
    /// count as missing.
    pub fn credentials(&self) -> Result<MailCredentials, String> {
        let recipient = non_empty(&self.to).ok_or("CONTACT_EMAIL_TO is not set")?;
        let sender = non_empty(&self.from).unwrap_or(recipient);
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or("CONTACT_EMAIL_PASSWORD is not set")?;

        Ok(MailCredentials {
            recipient: parse_address(recipient)?,
            sender: parse_address(sender)?,
            password: password.clone(),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_address(address: &str) -> Result<ContactEmail, String> {
    ContactEmail::parse(address.to_owned())
        .map_err(|_| format!("{} is not a valid email address", address))
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Layers `base.yaml`, the `APP_ENVIRONMENT` specific file, `APP_*`
/// overrides and finally the `CONTACT_EMAIL_*` variables.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!(
            "Failed to determine the current directory: {}",
            e
        ))
    })?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("contact.to", std::env::var("CONTACT_EMAIL_TO").ok())?
        .set_override_option("contact.from", std::env::var("CONTACT_EMAIL_FROM").ok())?
        .set_override_option(
            "contact.password",
            std::env::var("CONTACT_EMAIL_PASSWORD").ok(),
        )?
        .build()?;

    settings.try_deserialize::<Settings>()
}
