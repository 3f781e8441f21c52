use rocket::http::Status;
use serde_json::{json, Value};

use super::ContactSubmission;
use crate::config::MailConfig;
use crate::email::{Mailer, OutgoingMail};

/// Mail handed to the inbox for one accepted submission.
pub fn compose(mail: &MailConfig, sub: &ContactSubmission) -> OutgoingMail {
    OutgoingMail {
        from: mail.from.clone(),
        from_name: mail.from_name.clone(),
        to: mail.to.clone(),
        to_name: mail.to_name.clone(),
        reply_to: sub.email.clone(),
        reply_to_name: sub.name.clone(),
        subject: format!("New message from {}", sub.name),
        body: format!("From: {} <{}>\n\n{}", sub.name, sub.email, sub.message),
    }
}

/// Validate and forward one submission.
///
/// Honeypot hits and invalid fields get the same 422 body.
pub async fn relay(mailer: &dyn Mailer, mail: &MailConfig, submission: ContactSubmission) -> (Status, Value) {
    let sub = submission.trimmed();

    if sub.is_spam() {
        log::warn!("[relay] Honeypot filled, rejecting submission");
        return invalid();
    }
    if !sub.validate().is_empty() {
        return invalid();
    }

    match mailer.send(&compose(mail, &sub)).await {
        Ok(()) => {
            log::info!("[relay] Contact message from {} relayed", sub.name);
            (Status::Ok, json!({ "ok": true }))
        }
        Err(e) => {
            log::error!("[relay] Failed to send contact message: {}", e);
            (Status::InternalServerError, json!({ "ok": false, "error": e }))
        }
    }
}

fn invalid() -> (Status, Value) {
    (
        Status::UnprocessableEntity,
        json!({ "ok": false, "error": "Invalid submission" }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingMailer;

    fn mail_config() -> MailConfig {
        MailConfig {
            from: "site@example.com".into(),
            from_name: "Website".into(),
            to: "inbox@example.com".into(),
            to_name: "Contact Inbox".into(),
        }
    }

    fn valid() -> ContactSubmission {
        ContactSubmission {
            name: " Jane ".into(),
            email: "jane@example.com".into(),
            message: "Hello there".into(),
            website: String::new(),
        }
    }

    #[rocket::async_test]
    async fn valid_submission_is_mailed() {
        let mailer = RecordingMailer::ok();
        let (status, body) = relay(&mailer, &mail_config(), valid()).await;
        assert_eq!(status, Status::Ok);
        assert_eq!(body, json!({"ok": true}));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "New message from Jane");
        assert_eq!(sent[0].body, "From: Jane <jane@example.com>\n\nHello there");
        assert_eq!(sent[0].reply_to, "jane@example.com");
        assert_eq!(sent[0].to, "inbox@example.com");
    }

    #[rocket::async_test]
    async fn honeypot_rejects_even_valid_fields() {
        let mailer = RecordingMailer::ok();
        let sub = ContactSubmission { website: "http://buy.example".into(), ..valid() };
        let (status, body) = relay(&mailer, &mail_config(), sub).await;
        assert_eq!(status, Status::UnprocessableEntity);
        assert_eq!(body, json!({"ok": false, "error": "Invalid submission"}));
        assert!(mailer.sent().is_empty());
    }

    #[rocket::async_test]
    async fn invalid_email_is_422() {
        let mailer = RecordingMailer::ok();
        let sub = ContactSubmission { email: "jane".into(), ..valid() };
        let (status, _) = relay(&mailer, &mail_config(), sub).await;
        assert_eq!(status, Status::UnprocessableEntity);
        assert!(mailer.sent().is_empty());
    }

    #[rocket::async_test]
    async fn unmailable_address_is_422_not_500() {
        let mailer = RecordingMailer::ok();
        let sub = ContactSubmission { email: "a..b@example.com".into(), ..valid() };
        let (status, body) = relay(&mailer, &mail_config(), sub).await;
        assert_eq!(status, Status::UnprocessableEntity);
        assert_eq!(body, json!({"ok": false, "error": "Invalid submission"}));
        assert!(mailer.sent().is_empty());
    }

    #[rocket::async_test]
    async fn mailer_failure_is_500_with_reason() {
        let mailer = RecordingMailer::failing("SMTP send error: refused");
        let (status, body) = relay(&mailer, &mail_config(), valid()).await;
        assert_eq!(status, Status::InternalServerError);
        assert_eq!(body, json!({"ok": false, "error": "SMTP send error: refused"}));
    }
}
