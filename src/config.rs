//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Email delivery
//!
//! ```bash
//! export MAIL_API_KEY="re_..."
//! export MAIL_TO="reservations@villas.example,manager@villas.example"
//! export MAIL_FROM="Villa Reservations <no-reply@villas.example>"  # optional
//! export MAIL_API_URL="https://api.resend.com/emails"               # optional
//! ```
//!
//! Without `MAIL_API_KEY` reservation requests are written to the log instead
//! of being emailed.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` for rate limiting (default: `false`)
//! - `NOTIFICATION_TIMEOUT_SECS` - Send timeout (default: 15, range: 1-120)
//! - `SESSION_IDLE_TIMEOUT_SECS` - Booking session lifetime without requests (default: 1800)
//! - `SESSION_CAPACITY` - Maximum stored booking sessions (default: 10000, min: 100)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::infrastructure::notification::MailSettings;

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";
const DEFAULT_MAIL_FROM: &str = "Villa Reservations <reservations@example.com>";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Upper bound for one notification send, in seconds.
    pub notification_timeout_secs: u64,

    // ── Email delivery ──────────────────────────────────────────────────────
    pub mail_api_url: String,
    /// Enables the HTTP email sender when set.
    pub mail_api_key: Option<String>,
    pub mail_from: String,
    /// Reservations team inboxes (`MAIL_TO`, comma separated).
    pub mail_to: Vec<String>,

    // ── Booking sessions ────────────────────────────────────────────────────
    pub session_idle_timeout_secs: u64,
    pub session_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let notification_timeout_secs = parse_var("NOTIFICATION_TIMEOUT_SECS", 15)?;

        let mail_api_url =
            env::var("MAIL_API_URL").unwrap_or_else(|_| DEFAULT_MAIL_API_URL.to_string());
        let mail_api_key = env::var("MAIL_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let mail_from = env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string());
        let mail_to = env::var("MAIL_TO")
            .map(|v| split_addresses(&v))
            .unwrap_or_default();

        let session_idle_timeout_secs = parse_var("SESSION_IDLE_TIMEOUT_SECS", 1800)?;
        let session_capacity = parse_var("SESSION_CAPACITY", 10_000)?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            notification_timeout_secs,
            mail_api_url,
            mail_api_key,
            mail_from,
            mail_to,
            session_idle_timeout_secs,
            session_capacity,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - a timeout or capacity is out of range
    /// - email delivery is enabled without recipients or with a bad API URL
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !(1..=120).contains(&self.notification_timeout_secs) {
            anyhow::bail!(
                "NOTIFICATION_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.notification_timeout_secs
            );
        }

        if self.session_idle_timeout_secs == 0 {
            anyhow::bail!("SESSION_IDLE_TIMEOUT_SECS must be greater than 0");
        }

        if self.session_capacity < 100 {
            anyhow::bail!(
                "SESSION_CAPACITY must be at least 100, got {}",
                self.session_capacity
            );
        }

        if self.session_capacity > 1_000_000 {
            anyhow::bail!(
                "SESSION_CAPACITY is too large (max: 1000000), got {}",
                self.session_capacity
            );
        }

        let api_url = url::Url::parse(&self.mail_api_url)
            .with_context(|| format!("MAIL_API_URL is not a valid URL: '{}'", self.mail_api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "MAIL_API_URL must start with 'http://' or 'https://', got '{}'",
                self.mail_api_url
            );
        }

        if self.mail_from.trim().is_empty() {
            anyhow::bail!("MAIL_FROM must not be empty");
        }

        if self.is_email_enabled() && self.mail_to.is_empty() {
            anyhow::bail!("MAIL_TO must be set when MAIL_API_KEY is provided");
        }

        Ok(())
    }

    /// Returns whether reservation requests are emailed.
    pub fn is_email_enabled(&self) -> bool {
        self.mail_api_key.is_some()
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    /// Settings for the HTTP email sender, or `None` when email is disabled.
    pub fn mail_settings(&self) -> Option<MailSettings> {
        let api_key = self.mail_api_key.clone()?;
        Some(MailSettings {
            api_url: self.mail_api_url.clone(),
            api_key,
            from: self.mail_from.clone(),
            to: self.mail_to.clone(),
            timeout: self.notification_timeout(),
        })
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!(
            "  Notification timeout: {}s",
            self.notification_timeout_secs
        );

        if let Some(ref key) = self.mail_api_key {
            tracing::info!(
                "  Email: {} (key {}) -> {}",
                self.mail_api_url,
                mask_secret(key),
                self.mail_to.join(", ")
            );
        } else {
            tracing::info!("  Email: disabled (requests are logged)");
        }

        tracing::info!(
            "  Sessions: idle timeout {}s, capacity {}",
            self.session_idle_timeout_secs,
            self.session_capacity
        );
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

fn split_addresses(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks an API key for logging, keeping only its first four characters.
///
/// - `re_123456789` → `re_1***`
/// - `abc` → `***`
fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "***".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}***", visible)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
