pub mod smtp;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{Address, Message};

/// A plain-text message ready to hand to a [`Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
    pub reply_to: String,
    pub reply_to_name: String,
    pub subject: String,
    pub body: String,
}

#[rocket::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String>;
}

fn mailbox(name: &str, address: &str, what: &str) -> Result<Mailbox, String> {
    let addr: Address = address
        .parse()
        .map_err(|e| format!("Invalid {} address: {}", what, e))?;
    let name = if name.is_empty() { None } else { Some(name.to_string()) };
    Ok(Mailbox::new(name, addr))
}

/// Build the lettre message for an outgoing mail.
pub fn build_message(mail: &OutgoingMail) -> Result<Message, String> {
    Message::builder()
        .from(mailbox(&mail.from_name, &mail.from, "from")?)
        .to(mailbox(&mail.to_name, &mail.to, "to")?)
        .reply_to(mailbox(&mail.reply_to_name, &mail.reply_to, "reply-to")?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| format!("Failed to build email: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail() -> OutgoingMail {
        OutgoingMail {
            from: "site@example.com".into(),
            from_name: "Website".into(),
            to: "inbox@example.com".into(),
            to_name: "Contact Inbox".into(),
            reply_to: "jane@example.org".into(),
            reply_to_name: "Jane".into(),
            subject: "New message from Jane".into(),
            body: "From: Jane <jane@example.org>\n\nHello".into(),
        }
    }

    #[test]
    fn message_carries_reply_to() {
        let msg = build_message(&mail()).unwrap();
        let raw = String::from_utf8(msg.formatted()).unwrap();
        let reply_to = raw.lines().find(|l| l.starts_with("Reply-To:")).unwrap();
        assert!(reply_to.contains("<jane@example.org>"));
        assert!(raw.contains("Subject: New message from Jane"));
        assert!(raw.contains("<inbox@example.com>"));
    }

    #[test]
    fn bad_sender_is_reported() {
        let mut m = mail();
        m.from = "not-an-address".into();
        let err = build_message(&m).unwrap_err();
        assert!(err.starts_with("Invalid from address"));
    }
}
