//! src/routes/contact.rs

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use serde_json::{Map, Value};

use crate::domain::{ContactSubmission, FieldIssues, FieldValue};
use crate::mailer::ContactMailer;
use crate::routes::error_chain_fmt;

/// Request body of `POST /api/contact`. Any JSON object is accepted here;
/// absent or non-string fields surface as per-field issues.
#[derive(serde::Deserialize)]
#[serde(transparent)]
pub struct ContactFormData(Map<String, Value>);

impl ContactFormData {
    fn take(&mut self, field: &str) -> FieldValue {
        match self.0.remove(field) {
            None => FieldValue::Missing,
            Some(Value::String(text)) => FieldValue::Text(text),
            Some(Value::Null) => FieldValue::NotText("null"),
            Some(Value::Bool(_)) => FieldValue::NotText("boolean"),
            Some(Value::Number(_)) => FieldValue::NotText("number"),
            Some(Value::Array(_)) => FieldValue::NotText("array"),
            Some(Value::Object(_)) => FieldValue::NotText("object"),
        }
    }
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = FieldIssues;

    fn try_from(mut form: ContactFormData) -> Result<Self, Self::Error> {
        let name = form.take("name");
        let email = form.take("email");
        let message = form.take("message");
        ContactSubmission::parse(name, email, message)
    }
}

#[derive(serde::Serialize)]
pub struct ContactResponse<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    issues: Option<&'a FieldIssues>,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid form submission")]
    ValidationError(FieldIssues),
    #[error("Invalid form submission")]
    MalformedBody(#[source] JsonPayloadError),
    #[error("Contact form email service is not configured.")]
    NotConfigured,
    #[error("Failed to send message. Please try again later.")]
    SendEmailError(#[source] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::SendEmailError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let no_issues = FieldIssues::default();
        let issues = match self {
            Self::ValidationError(issues) => Some(issues),
            Self::MalformedBody(_) => Some(&no_issues),
            Self::NotConfigured | Self::SendEmailError(_) => None,
        };
        HttpResponse::build(self.status_code()).json(ContactResponse {
            success: false,
            message: &self.to_string(),
            issues,
        })
    }
}

/// Bodies that are not a JSON object get the failed-validation envelope
/// with no field issues.
pub fn json_error_handler(
    err: JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ContactError::MalformedBody(err).into()
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(form, mailer),
    fields(
        contact_name = tracing::field::Empty,
        contact_email = tracing::field::Empty,
    )
)]
pub async fn contact(
    form: web::Json<ContactFormData>,
    mailer: web::Data<Option<ContactMailer>>,
) -> Result<HttpResponse, ContactError> {
    let submission: ContactSubmission = form
        .0
        .try_into()
        .map_err(ContactError::ValidationError)?;
    tracing::Span::current()
        .record("contact_name", &tracing::field::display(&submission.name))
        .record("contact_email", &tracing::field::display(&submission.email));

    let mailer = mailer
        .get_ref()
        .as_ref()
        .ok_or(ContactError::NotConfigured)?;
    mailer.relay(&submission).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, "Failed to send contact email");
        ContactError::SendEmailError(e)
    })?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: "Message sent",
        issues: None,
    }))
}
