use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{build_message, Mailer, OutgoingMail};
use crate::config::SmtpConfig;

/// STARTTLS relay with username/password auth.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        SmtpMailer { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, String> {
        if self.config.host.is_empty() || self.config.username.is_empty() {
            return Err("SMTP host or username not configured".into());
        }
        let creds = Credentials::new(self.config.username.clone(), self.config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| format!("SMTP relay error: {}", e))?
            .port(self.config.port)
            .credentials(creds)
            .build();
        Ok(transport)
    }
}

#[rocket::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), String> {
        let message = build_message(mail)?;
        let transport = self.transport()?;
        transport
            .send(message)
            .await
            .map_err(|e| format!("SMTP send error: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rocket::async_test]
    async fn unconfigured_host_fails_before_connecting() {
        let mailer = SmtpMailer::new(SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: String::new(),
            password: String::new(),
        });
        let mail = OutgoingMail {
            from: "a@example.com".into(),
            from_name: String::new(),
            to: "b@example.com".into(),
            to_name: String::new(),
            reply_to: "c@example.com".into(),
            reply_to_name: String::new(),
            subject: "s".into(),
            body: "b".into(),
        };
        let err = mailer.send(&mail).await.unwrap_err();
        assert_eq!(err, "SMTP host or username not configured");
    }
}
