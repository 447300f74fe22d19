// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use std::fmt;
use url::Url;

/// Token credential pair for BookStack API authentication.
///
/// BookStack issues API tokens as an id/secret pair and expects them
/// joined in a `Token {id}:{secret}` authorization header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    id: String,
    secret: String,
}

impl ApiToken {
    /// Create a new token pair with validation
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        let secret = secret.into().trim().to_string();

        if id.is_empty() {
            return Err(ValidationError::InvalidApiToken {
                reason: "token id cannot be empty".to_string(),
            });
        }

        if secret.is_empty() {
            return Err(ValidationError::InvalidApiToken {
                reason: "token secret cannot be empty".to_string(),
            });
        }

        if id.contains(':') || id.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidApiToken {
                reason: "token id must not contain ':' or whitespace".to_string(),
            });
        }

        Ok(Self { id, secret })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The value sent in the `Authorization` header.
    pub fn authorization_value(&self) -> String {
        format!("Token {}:{}", self.id, self.secret)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the secret in display
        write!(f, "{}:***", self.id)
    }
}

/// Validated base address of a BookStack instance, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("base url"));
        }

        let url = Url::parse(trimmed).map_err(|e| ValidationError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::InvalidUrl {
                    url: trimmed.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                })
            }
        }

        if url.host_str().is_none() {
            return Err(ValidationError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "missing host".to_string(),
            });
        }

        // Url normalizes an empty path to "/", so trim from the string form.
        let normalized = url.as_str().trim_end_matches('/').to_string();
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Root of the REST API, e.g. `https://docs.example.com/api`.
    pub fn api_root(&self) -> String {
        format!("{}/api", self.0)
    }

    /// Joins a web path (leading slash optional) onto the base address.
    pub fn web(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
