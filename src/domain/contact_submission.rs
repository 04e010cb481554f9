//! src/domain/contact_submission.rs

use std::collections::BTreeMap;

use crate::domain::{ContactEmail, ContactMessage, ContactName};

/// A contact form entry that passed validation. It only lives for the
/// duration of one request.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

/// One field as it arrived, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Missing,
    Text(String),
    /// Present but not a string; carries the kind that was received.
    NotText(&'static str),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Validation failures keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldIssues(BTreeMap<String, Vec<String>>);

impl FieldIssues {
    pub fn push(&mut self, field: &str, issue: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(issue.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ContactSubmission {
    /// Checks every field and reports all failures together.
    pub fn parse(
        name: FieldValue,
        email: FieldValue,
        message: FieldValue,
    ) -> Result<ContactSubmission, FieldIssues> {
        let mut issues = FieldIssues::default();
        let name = check_field(&mut issues, "name", name, ContactName::parse);
        let email = check_field(&mut issues, "email", email, ContactEmail::parse);
        let message = check_field(&mut issues, "message", message, ContactMessage::parse);

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(issues),
        }
    }
}

fn check_field<T>(
    issues: &mut FieldIssues,
    field: &str,
    value: FieldValue,
    parse: impl FnOnce(String) -> Result<T, String>,
) -> Option<T> {
    let outcome = match value {
        FieldValue::Text(text) => parse(text),
        FieldValue::Missing => Err("Required".to_string()),
        FieldValue::NotText(kind) => Err(format!("Expected string, received {}", kind)),
    };
    match outcome {
        Ok(parsed) => Some(parsed),
        Err(issue) => {
            issues.push(field, issue);
            None
        }
    }
}
