use std::collections::HashMap;

use crate::content::ContentKind;

/// Base URL + key pair for one remote content kind.
#[derive(Debug, Clone, Default)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
}

impl UpstreamConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.api_key.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
}

/// Contact details shown next to the form.
#[derive(Debug, Clone)]
pub struct ContactInfo {
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// Server-side configuration. Everything comes from the environment;
/// secrets never reach the rendered page.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub site_name: String,
    pub splash: bool,
    pub clients: UpstreamConfig,
    pub events: UpstreamConfig,
    pub galleries: UpstreamConfig,
    pub smtp: SmtpConfig,
    pub mail: MailConfig,
    pub cors_origin: String,
    pub relay_url: Option<String>,
    pub contact: ContactInfo,
    pub companies_file: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_map(&vars)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        let sg = |key: &str, def: &str| -> String {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| def.to_string())
        };
        let upstream = |prefix: &str| UpstreamConfig {
            base_url: sg(&format!("{}_API_URL", prefix), ""),
            api_key: sg(&format!("{}_API_KEY", prefix), ""),
        };

        let username = sg("SMTP_USERNAME", "");
        let from = sg("MAIL_FROM", &username);
        let to = sg("MAIL_TO", &from);
        let relay_url = sg("MAIL_RELAY_URL", "");

        SiteConfig {
            site_name: sg("SITE_NAME", "Jessy Mathew International"),
            splash: parse_bool(&sg("SITE_SPLASH", "false")),
            clients: upstream("CLIENTS"),
            events: upstream("EVENTS"),
            galleries: upstream("GALLERIES"),
            smtp: SmtpConfig {
                host: sg("SMTP_HOST", "smtp.gmail.com"),
                port: sg("SMTP_PORT", "587").parse().unwrap_or(587),
                username,
                password: sg("SMTP_PASSWORD", ""),
            },
            mail: MailConfig {
                from,
                from_name: sg("MAIL_FROM_NAME", "Website"),
                to,
                to_name: sg("MAIL_TO_NAME", "Contact Inbox"),
            },
            cors_origin: sg("CORS_ORIGIN", "http://localhost:5173"),
            relay_url: if relay_url.is_empty() { None } else { Some(relay_url) },
            contact: ContactInfo {
                address: sg("CONTACT_ADDRESS", "12th Street, Oman"),
                email: sg("CONTACT_EMAIL", "contact@jminternational.com"),
                phone: sg("CONTACT_PHONE", "+972 (123) 000- 0000"),
            },
            companies_file: sg("COMPANIES_FILE", "website/companies.toml"),
        }
    }

    pub fn upstream(&self, kind: ContentKind) -> &UpstreamConfig {
        match kind {
            ContentKind::Clients => &self.clients,
            ContentKind::Events => &self.events,
            ContentKind::Galleries => &self.galleries,
        }
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
