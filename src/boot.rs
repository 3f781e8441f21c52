use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::ContentKind;

/// Directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &["website", "website/static"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories and warns about configuration gaps.
/// Never aborts: every gap degrades to a section-local error at request time.
pub fn run(config: &SiteConfig) -> u32 {
    info!("[boot] {} boot check starting...", config.site_name);

    let mut warnings = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    warnings += 1;
                }
            }
        }
    }

    // ── 2. Configuration ───────────────────────────────
    for gap in config_warnings(config) {
        warn!("  {}", gap);
        warnings += 1;
    }

    // ── 3. Rocket.toml exists ──────────────────────────
    if !Path::new("Rocket.toml").exists() {
        info!("  Rocket.toml not found, using default config");
    }

    // ── Summary ────────────────────────────────────────
    if warnings > 0 {
        warn!(
            "[boot] Boot check passed with {} warning(s). Some sections may show errors.",
            warnings
        );
    } else {
        info!("[boot] Boot check passed. All systems go.");
    }
    warnings
}

/// Human-readable list of missing settings. Never includes secret values.
pub fn config_warnings(config: &SiteConfig) -> Vec<String> {
    let mut out = Vec::new();

    for kind in ContentKind::ALL {
        let upstream = config.upstream(kind);
        if !upstream.is_configured() {
            let prefix = kind.as_str().to_uppercase();
            out.push(format!(
                "{} upstream not configured ({}_API_URL / {}_API_KEY), /api/{} will answer 500",
                kind, prefix, prefix, kind
            ));
        }
    }

    if config.relay_url.is_none() {
        if config.smtp.username.is_empty() || config.smtp.password.is_empty() {
            out.push("SMTP credentials not set (SMTP_USERNAME / SMTP_PASSWORD), contact mail will fail".to_string());
        }
        if config.mail.to.is_empty() {
            out.push("No contact recipient (MAIL_TO / MAIL_FROM / SMTP_USERNAME)".to_string());
        }
    }

    if !Path::new(&config.companies_file).exists() {
        out.push(format!("{} not found, using the built-in company list", config.companies_file));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> SiteConfig {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        SiteConfig::from_map(&vars)
    }

    #[test]
    fn empty_environment_reports_every_gap() {
        let warnings = config_warnings(&config(&[("COMPANIES_FILE", "missing.toml")]));
        assert!(warnings.iter().any(|w| w.starts_with("clients upstream")));
        assert!(warnings.iter().any(|w| w.starts_with("events upstream")));
        assert!(warnings.iter().any(|w| w.starts_with("galleries upstream")));
        assert!(warnings.iter().any(|w| w.contains("SMTP credentials")));
        assert!(warnings.iter().any(|w| w.contains("missing.toml")));
    }

    #[test]
    fn secrets_never_appear() {
        let warnings = config_warnings(&config(&[
            ("CLIENTS_API_URL", "https://api.example.com/clients"),
            ("EVENTS_API_KEY", "super-secret-key"),
            ("SMTP_USERNAME", "user@example.com"),
        ]));
        assert!(!warnings.iter().any(|w| w.contains("super-secret-key")));
        assert!(warnings.iter().any(|w| w.starts_with("clients upstream")));
    }

    #[test]
    fn external_relay_skips_smtp_checks() {
        let warnings = config_warnings(&config(&[("MAIL_RELAY_URL", "https://relay.example.com/contact")]));
        assert!(!warnings.iter().any(|w| w.contains("SMTP")));
    }
}
