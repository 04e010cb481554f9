//! tests/api/contact_form.rs

use crate::helpers::spawn_app;
use portfolio_contact::client::{
    ContactClient, ContactForm, Field, SubmitStatus, FALLBACK_ERROR_MESSAGE,
    FALLBACK_SUCCESS_MESSAGE,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn filled_form(email: &str) -> ContactForm {
    let mut form = ContactForm::new();
    form.update(Field::Name, "Ann");
    form.update(Field::Email, email);
    form.update(Field::Message, "Hi");
    form
}

#[tokio::test]
async fn a_successful_submission_clears_the_form() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&app.contact_client()).await;

    assert_eq!(form.value(Field::Name), "");
    assert_eq!(form.value(Field::Email), "");
    assert_eq!(form.value(Field::Message), "");
    assert!(!form.is_pending());
    assert_eq!(form.status(), SubmitStatus::Success("Message sent".into()));
}

#[tokio::test]
async fn a_failed_delivery_keeps_the_form_and_shows_the_server_message() {
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&app.contact_client()).await;

    assert_eq!(form.value(Field::Name), "Ann");
    assert_eq!(form.value(Field::Email), "ann@example.com");
    assert_eq!(form.value(Field::Message), "Hi");
    assert!(!form.is_pending());
    assert_eq!(
        form.status(),
        SubmitStatus::Error("Failed to send message. Please try again later.".into())
    );
}

#[tokio::test]
async fn a_rejected_submission_shows_the_validation_message() {
    let app = spawn_app().await;
    let mut form = filled_form("not-an-email");

    form.submit(&app.contact_client()).await;

    assert_eq!(form.value(Field::Email), "not-an-email");
    assert_eq!(
        form.status(),
        SubmitStatus::Error("Invalid form submission".into())
    );
}

#[tokio::test]
async fn editing_a_field_clears_the_previous_outcome() {
    let app = spawn_app().await;
    let mut form = filled_form("not-an-email");
    form.submit(&app.contact_client()).await;

    form.update(Field::Email, "ann@example.com");

    assert_eq!(form.status(), SubmitStatus::Idle);
}

#[tokio::test]
async fn ok_status_without_success_flag_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "success": false, "message": "Nope" })),
        )
        .mount(&server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&ContactClient::new(&server.uri())).await;

    assert_eq!(form.status(), SubmitStatus::Error("Nope".into()));
    assert_eq!(form.value(Field::Name), "Ann");
}

#[tokio::test]
async fn failures_without_a_message_use_the_fallback() {
    let server = MockServer::start().await;
    Mock::given(path("/api/contact"))
        .respond_with(ResponseTemplate::new(502).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&ContactClient::new(&server.uri())).await;

    assert_eq!(
        form.status(),
        SubmitStatus::Error(FALLBACK_ERROR_MESSAGE.into())
    );
}

#[tokio::test]
async fn a_non_json_reply_uses_the_fallback() {
    let server = MockServer::start().await;
    Mock::given(path("/api/contact"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&ContactClient::new(&server.uri())).await;

    assert_eq!(
        form.status(),
        SubmitStatus::Error(FALLBACK_ERROR_MESSAGE.into())
    );
    assert!(!form.is_pending());
}

#[tokio::test]
async fn success_without_a_message_uses_the_fallback() {
    let server = MockServer::start().await;
    Mock::given(path("/api/contact"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .mount(&server)
        .await;
    let mut form = filled_form("ann@example.com");

    form.submit(&ContactClient::new(&server.uri())).await;

    assert_eq!(
        form.status(),
        SubmitStatus::Success(FALLBACK_SUCCESS_MESSAGE.into())
    );
    assert_eq!(form.value(Field::Message), "");
}

#[tokio::test]
async fn an_unreachable_server_uses_the_fallback() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
    drop(listener);
    let mut form = filled_form("ann@example.com");

    form.submit(&ContactClient::new(&uri)).await;

    assert_eq!(
        form.status(),
        SubmitStatus::Error(FALLBACK_ERROR_MESSAGE.into())
    );
    assert_eq!(form.value(Field::Name), "Ann");
}
