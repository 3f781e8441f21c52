use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use super::{relay, validate_fields, ContactFields, ContactSubmission, FieldErrors};
use crate::config::MailConfig;
use crate::email::Mailer;

/// How long a notice stays up before it fades on its own.
pub const NOTICE_DISMISS_AFTER: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub dismiss_after: Duration,
}

impl Notice {
    fn new(kind: NoticeKind, text: String) -> Self {
        Notice { kind, text, dismiss_after: NOTICE_DISMISS_AFTER }
    }
}

/// Raw relay answer; the form decides what counts as sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    pub body: Value,
}

impl RelayReply {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status) && self.body.get("ok").and_then(|v| v.as_bool()) == Some(true)
    }

    fn failure_reason(&self) -> String {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

/// Where the contact form posts to.
#[rocket::async_trait]
pub trait Relay: Send + Sync {
    async fn post(&self, payload: &ContactSubmission) -> Result<RelayReply, String>;
}

/// An external relay endpoint speaking the same JSON contract.
pub struct HttpRelay {
    client: reqwest::Client,
    url: String,
}

impl HttpRelay {
    pub fn new(url: &str) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(HttpRelay { client, url: url.to_string() })
    }
}

#[rocket::async_trait]
impl Relay for HttpRelay {
    async fn post(&self, payload: &ContactSubmission) -> Result<RelayReply, String> {
        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| format!("Relay request failed: {}", e))?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(|e| format!("Relay reply unreadable: {}", e))?;
        Ok(RelayReply { status, body: reply_body(&bytes) })
    }
}

/// A relay answering with something other than JSON (a proxy error page,
/// say) still yields a reply; its status then decides the outcome.
fn reply_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice(bytes) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[contact] Relay reply is not JSON: {}", e);
            json!({})
        }
    }
}

/// The built-in relay, called in-process.
pub struct LocalRelay {
    pub mailer: Arc<dyn Mailer>,
    pub mail: MailConfig,
}

#[rocket::async_trait]
impl Relay for LocalRelay {
    async fn post(&self, payload: &ContactSubmission) -> Result<RelayReply, String> {
        let (status, body) = relay::relay(&*self.mailer, &self.mail, payload.clone()).await;
        Ok(RelayReply { status: status.code, body })
    }
}

/// Client side of the contact form: fields, field errors and the notice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub website: String,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
}

impl ContactForm {
    pub fn from_fields(fields: ContactFields) -> Self {
        let sub = fields.into_submission();
        ContactForm {
            name: sub.name,
            email: sub.email,
            message: sub.message,
            website: sub.website,
            ..ContactForm::default()
        }
    }

    pub fn validate(&mut self) -> bool {
        self.errors = validate_fields(&self.name, &self.email, &self.message);
        self.errors.is_empty()
    }

    /// Validate, then post exactly once. Returns true when the relay
    /// confirmed the send; the fields are cleared in that case.
    ///
    /// The honeypot is posted as submitted. A browser without scripts
    /// cannot drop it client-side, so the relay is the one that rejects a
    /// filled trap.
    pub async fn submit(&mut self, relay: &dyn Relay) -> bool {
        self.notice = None;
        if !self.validate() {
            return false;
        }

        let payload = ContactSubmission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
            website: self.website.clone(),
        };

        let failure = match relay.post(&payload).await {
            Ok(reply) if reply.is_ok() => None,
            Ok(reply) => Some(reply.failure_reason()),
            Err(e) => Some(e),
        };

        match failure {
            None => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.website.clear();
                self.notice = Some(Notice::new(
                    NoticeKind::Success,
                    "Message sent! We\u{2019}ll get back to you shortly.".into(),
                ));
                true
            }
            Some(reason) => {
                log::warn!("[contact] Send failed: {}", reason);
                self.notice = Some(Notice::new(NoticeKind::Error, format!("Send failed: {}", reason)));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubRelay;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            message: "Hello".into(),
            ..ContactForm::default()
        }
    }

    #[rocket::async_test]
    async fn empty_name_blocks_without_posting() {
        let relay = StubRelay::replying(200, json!({"ok": true}));
        let mut form = ContactForm { name: "  ".into(), ..filled() };
        assert!(!form.submit(&relay).await);
        assert_eq!(form.errors.name, Some("Name is required"));
        assert!(relay.posted().is_empty());
        assert!(form.notice.is_none());
    }

    #[rocket::async_test]
    async fn success_posts_once_and_clears() {
        let relay = StubRelay::replying(200, json!({"ok": true}));
        let mut form = filled();
        assert!(form.submit(&relay).await);

        let posted = relay.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(
            posted[0],
            ContactSubmission {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hello".into(),
                website: String::new(),
            }
        );
        assert_eq!((form.name.as_str(), form.email.as_str(), form.message.as_str()), ("", "", ""));
        let notice = form.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.dismiss_after, Duration::from_millis(3500));
    }

    #[rocket::async_test]
    async fn two_xx_without_ok_flag_is_a_failure() {
        let relay = StubRelay::replying(200, json!({}));
        let mut form = filled();
        assert!(!form.submit(&relay).await);
        assert_eq!(form.name, "Jane");
        assert_eq!(form.notice.unwrap().text, "Send failed: HTTP 200");
    }

    #[rocket::async_test]
    async fn relay_error_text_is_surfaced() {
        let relay = StubRelay::replying(422, json!({"ok": false, "error": "Invalid submission"}));
        let mut form = filled();
        assert!(!form.submit(&relay).await);
        let notice = form.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, "Send failed: Invalid submission");
    }

    #[rocket::async_test]
    async fn transport_error_is_surfaced() {
        let relay = StubRelay::new(Err("Relay request failed: refused".into()));
        let mut form = filled();
        assert!(!form.submit(&relay).await);
        assert_eq!(form.notice.unwrap().text, "Send failed: Relay request failed: refused");
    }

    #[rocket::async_test]
    async fn honeypot_is_passed_through_to_the_relay() {
        let relay = StubRelay::replying(422, json!({"ok": false, "error": "Invalid submission"}));
        let mut form = ContactForm { website: "http://spam.example".into(), ..filled() };
        assert!(!form.submit(&relay).await);
        assert_eq!(relay.posted()[0].website, "http://spam.example");
        assert_eq!(form.notice.unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn html_reply_decodes_to_empty_body() {
        let reply = RelayReply { status: 502, body: reply_body(b"<html>Bad Gateway</html>") };
        assert_eq!(reply.body, json!({}));
        assert!(!reply.is_ok());
        assert_eq!(reply.failure_reason(), "HTTP 502");
        assert_eq!(reply_body(br#"{"ok":true}"#), json!({"ok": true}));
    }

    #[test]
    fn reply_ok_needs_status_and_flag() {
        assert!(RelayReply { status: 201, body: json!({"ok": true}) }.is_ok());
        assert!(!RelayReply { status: 500, body: json!({"ok": true}) }.is_ok());
        assert!(!RelayReply { status: 200, body: json!({"ok": "true"}) }.is_ok());
    }
}
