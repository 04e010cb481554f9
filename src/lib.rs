//! src/lib.rs

pub mod client;
pub mod configurations;
pub mod domain;
pub mod email_client;
pub mod mailer;
pub mod routes;
pub mod smtp_transport;
pub mod startup;
pub mod telemetry;
