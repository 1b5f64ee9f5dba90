//! # Domain Value Objects
//!
//! Immutable value types validated on construction.

use serde::{Deserialize, Serialize};

/// Validated website address shown on the website management screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebsiteUrl {
    url: String,
    is_secure: bool,
    domain: String,
}

impl WebsiteUrl {
    /// Creates a new validated URL
    ///
    /// # Errors
    /// Returns error if the URL is empty, unparsable, not http(s) or has no host
    pub fn new(url: impl Into<String>) -> Result<Self, UrlError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(UrlError::Empty);
        }

        let parsed = url::Url::parse(url.trim()).map_err(|_| UrlError::InvalidFormat)?;

        let is_secure = match parsed.scheme() {
            "https" => true,
            "http" => false,
            other => return Err(UrlError::UnsupportedScheme(other.to_string())),
        };

        let domain = parsed.host_str().ok_or(UrlError::NoDomain)?.to_string();

        Ok(Self {
            url: url.trim().to_string(),
            is_secure,
            domain,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.is_secure
    }
}

impl TryFrom<String> for WebsiteUrl {
    type Error = UrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WebsiteUrl> for String {
    fn from(value: WebsiteUrl) -> Self {
        value.url
    }
}

impl std::fmt::Display for WebsiteUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

/// URL validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("URL format is invalid")]
    InvalidFormat,
    #[error("URL scheme '{0}' is not supported")]
    UnsupportedScheme(String),
    #[error("URL must have a valid domain")]
    NoDomain,
}
