// src/config.rs
use crate::api::ClientSettings;
use crate::constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_UPLOAD_TIMEOUT};
use crate::error::AppError;
use crate::error_recovery::RateLimitPolicy;
use crate::types::{ApiToken, BaseUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input. Every connection setting can also come from
/// the environment, which is how MCP hosts usually pass them.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// BookStack instance URL (e.g., "https://docs.example.com")
    #[arg(long, env = "BOOKSTACK_BASE_URL")]
    pub base_url: Option<String>,

    /// API token id, from the user's profile in BookStack
    #[arg(long, env = "BOOKSTACK_TOKEN_ID")]
    pub token_id: Option<String>,

    /// API token secret
    #[arg(long, env = "BOOKSTACK_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: Option<String>,

    /// Allow create, update and delete tools ("true", "1" or "yes")
    #[arg(long, env = "BOOKSTACK_ENABLE_WRITE")]
    pub enable_write: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Log file path (defaults to bookstack_mcp.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<String>,

    /// Timeout for ordinary API calls, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Timeout for attachment uploads, in seconds
    #[arg(long, default_value_t = DEFAULT_UPLOAD_TIMEOUT.as_secs())]
    pub upload_timeout_secs: u64,
}

/// Resolved server configuration, validated and immutable.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub base_url: BaseUrl,
    pub token: ApiToken,
    pub write_enabled: bool,
    pub request_timeout: Duration,
    pub upload_timeout: Duration,
    pub rate_limit: RateLimitPolicy,
    pub verbose: bool,
    pub log_file: PathBuf,
}

impl ServerConfig {
    /// Resolves configuration from CLI input (which already carries any
    /// environment fallbacks).
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let base_url = require(cli.base_url, "BOOKSTACK_BASE_URL")?;
        let token_id = require(cli.token_id, "BOOKSTACK_TOKEN_ID")?;
        let token_secret = require(cli.token_secret, "BOOKSTACK_TOKEN_SECRET")?;

        if cli.timeout_secs == 0 || cli.upload_timeout_secs == 0 {
            return Err(AppError::Validation(
                "timeouts must be at least one second".to_string(),
            ));
        }

        Ok(ServerConfig {
            base_url: BaseUrl::parse(&base_url)?,
            token: ApiToken::new(token_id, token_secret)?,
            write_enabled: cli.enable_write.as_deref().is_some_and(parse_flag),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            upload_timeout: Duration::from_secs(cli.upload_timeout_secs),
            rate_limit: RateLimitPolicy::default(),
            verbose: cli.verbose,
            log_file: cli
                .log_file
                .map(PathBuf::from)
                .unwrap_or_else(default_log_file),
        })
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: self.request_timeout,
            upload_timeout: self.upload_timeout,
            rate_limit: self.rate_limit,
        }
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", name))
        })
}

/// `true`, `1` and `yes`, case-insensitively. Anything else is off.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("bookstack_mcp.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(write: Option<&str>) -> CommandLineInput {
        CommandLineInput {
            base_url: Some("https://docs.example.com/".to_string()),
            token_id: Some("abc".to_string()),
            token_secret: Some("xyz".to_string()),
            enable_write: write.map(str::to_string),
            verbose: false,
            log_file: None,
            timeout_secs: 30,
            upload_timeout_secs: 120,
        }
    }

    #[test]
    fn resolves_complete_input() {
        let config = ServerConfig::resolve(cli(None)).unwrap();
        assert_eq!(config.base_url.as_str(), "https://docs.example.com");
        assert!(!config.write_enabled);
        assert_eq!(config.client_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn write_flag_accepts_common_spellings() {
        for value in ["true", "TRUE", "1", "yes"] {
            assert!(ServerConfig::resolve(cli(Some(value))).unwrap().write_enabled);
        }
        for value in ["false", "0", "no", ""] {
            assert!(!ServerConfig::resolve(cli(Some(value))).unwrap().write_enabled);
        }
    }

    #[test]
    fn missing_token_is_reported_by_name() {
        let mut input = cli(None);
        input.token_secret = Some("  ".to_string());
        let err = ServerConfig::resolve(input).unwrap_err();
        assert!(err.to_string().contains("BOOKSTACK_TOKEN_SECRET"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut input = cli(None);
        input.base_url = Some("ftp://docs.example.com".to_string());
        assert!(ServerConfig::resolve(input).is_err());
    }
}
