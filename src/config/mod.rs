use std::path::PathBuf;

use crate::errors::{DigestError, DigestResult};
use crate::services::DEFAULT_PAGE_SIZE;
use crate::sources::discuss::DEFAULT_GRAPHQL_URL;

const DEFAULT_FALLBACK_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub enum EmailMode {
    Sendgrid { api_key: String },
    Smtp { host: String, user: String, pass: String },
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub mode: EmailMode,
    pub from_email: String,
    pub from_name: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub graphql_url: String,
    pub checkpoint_path: String,
    pub page_size: usize,
    pub fallback_hours: i64,
    pub scan_full_page: bool,
    pub report_dir: Option<String>,
    pub email: Option<EmailConfig>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> DigestResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let graphql_url = std::env::var("LCDIGEST_GRAPHQL_URL")
            .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string());

        // Default checkpoint path is relative to executable directory
        let checkpoint_path = std::env::var("LCDIGEST_CHECKPOINT_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| {
                    d.join("last_processed_timestamp.txt")
                        .to_string_lossy()
                        .into_owned()
                })
                .unwrap_or_else(|| "./last_processed_timestamp.txt".to_string())
        });

        let page_size = parse_var("LCDIGEST_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(DigestError::Config(
                "LCDIGEST_PAGE_SIZE must be at least 1".to_string(),
            ));
        }

        let fallback_hours = parse_var("LCDIGEST_FALLBACK_HOURS", DEFAULT_FALLBACK_HOURS)?;
        if fallback_hours <= 0 {
            return Err(DigestError::Config(
                "LCDIGEST_FALLBACK_HOURS must be positive".to_string(),
            ));
        }

        let scan_full_page = parse_var("LCDIGEST_SCAN_FULL_PAGE", true)?;

        let report_dir = std::env::var("LCDIGEST_REPORT_DIR").ok().filter(|v| !v.is_empty());

        let email = Self::email_from_env()?;

        Ok(Self {
            graphql_url,
            checkpoint_path,
            page_size,
            fallback_hours,
            scan_full_page,
            report_dir,
            email,
        })
    }

    /// Email is optional: unset `LCDIGEST_EMAIL_MODE` disables delivery
    /// entirely, but a selected mode with missing credentials is an error.
    fn email_from_env() -> DigestResult<Option<EmailConfig>> {
        let mode_var = match std::env::var("LCDIGEST_EMAIL_MODE") {
            Ok(v) if !v.is_empty() => v,
            _ => return Ok(None),
        };

        let mode = match mode_var.to_lowercase().as_str() {
            "sendgrid" => EmailMode::Sendgrid {
                api_key: require_var("SENDGRID_API_KEY")?,
            },
            "smtp" => EmailMode::Smtp {
                host: require_var("SMTP_HOST")?,
                user: require_var("SMTP_USER")?,
                pass: require_var("SMTP_PASS")?,
            },
            other => {
                return Err(DigestError::Config(format!(
                    "Unknown LCDIGEST_EMAIL_MODE: {} (expected sendgrid or smtp)",
                    other
                )))
            }
        };

        let from_email = require_var("EMAIL_FROM")?;
        let from_name =
            std::env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "LeetCode Digest".to_string());

        let recipients = parse_recipients(&require_var("EMAIL_TO")?);
        if recipients.is_empty() {
            return Err(DigestError::Config(
                "EMAIL_TO must contain at least one address".to_string(),
            ));
        }

        Ok(Some(EmailConfig {
            mode,
            from_email,
            from_name,
            recipients,
        }))
    }
}

fn require_var(name: &str) -> DigestResult<String> {
    std::env::var(name).map_err(|_| DigestError::MissingEnvVar(name.to_string()))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> DigestResult<T> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map_err(|_| DigestError::Config(format!("Invalid value for {}: {}", name, raw))),
        _ => Ok(default),
    }
}

fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
