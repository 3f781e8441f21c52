pub mod form;
pub mod relay;

use std::sync::OnceLock;

use lettre::Address;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Contact-form body as posted to the relay. `website` is the honeypot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub website: String,
}

/// Incoming fields from JSON or a urlencoded form; anything missing is empty.
#[derive(Debug, Default, Deserialize, FromForm)]
pub struct ContactFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub website: Option<String>,
}

impl ContactFields {
    pub fn into_submission(self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            website: self.website.unwrap_or_default(),
        }
    }
}

impl ContactSubmission {
    pub fn trimmed(self) -> Self {
        ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
            website: self.website.trim().to_string(),
        }
    }

    pub fn is_spam(&self) -> bool {
        !self.website.trim().is_empty()
    }

    pub fn validate(&self) -> FieldErrors {
        validate_fields(&self.name, &self.email, &self.message)
    }
}

/// Per-field messages; an empty set means the form may be sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("email pattern is valid")
    })
}

/// Pattern match plus the stricter RFC checks the mailer applies, so an
/// address that passes here can always be used as the Reply-To.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email_pattern().is_match(email) && email.parse::<Address>().is_ok()
}

pub fn validate_fields(name: &str, email: &str, message: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if name.trim().is_empty() {
        errors.name = Some("Name is required");
    }
    if email.trim().is_empty() {
        errors.email = Some("Email is required");
    } else if !is_valid_email(email) {
        errors.email = Some("Enter a valid email");
    }
    if message.trim().is_empty() {
        errors.message = Some("Message is required");
    }
    errors
}
