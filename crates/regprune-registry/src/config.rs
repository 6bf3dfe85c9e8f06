//! Configuration types for registry client.

use std::time::Duration;

use url::Url;

use crate::error::RegistryError;

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL without trailing slash (e.g.
    /// "<https://registry.example.com>").
    pub url: String,

    /// Authentication configuration.
    pub auth: RegistryAuth,

    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl RegistryConfig {
    /// Creates a new registry configuration with the given URL.
    ///
    /// A bare host gets an `https://` scheme and trailing slashes are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("registry.example.com/");
    /// assert_eq!(config.url, "https://registry.example.com");
    ///
    /// let config = RegistryConfig::new("http://localhost:5000");
    /// assert_eq!(config.url, "http://localhost:5000");
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: normalize_url(&url.into()),
            auth: RegistryAuth::None,
            timeout: None,
            user_agent: format!("regprune/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the authentication method.
    #[must_use]
    pub fn with_auth(mut self, auth: RegistryAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the registry host, including a non-default port. This is the
    /// key used to look up stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or has no host.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("https://registry.example.com:5000/");
    /// assert_eq!(config.host().unwrap(), "registry.example.com:5000");
    /// ```
    pub fn host(&self) -> Result<String, RegistryError> {
        let parsed = Url::parse(&self.url).map_err(|_| RegistryError::InvalidUrl {
            url: self.url.clone(),
        })?;
        let host = parsed.host_str().ok_or_else(|| RegistryError::InvalidUrl {
            url: self.url.clone(),
        })?;

        Ok(parsed
            .port()
            .map_or_else(|| host.to_string(), |port| format!("{host}:{port}")))
    }

    /// Returns the URL of an API V2 path for a repository.
    #[must_use]
    pub fn endpoint(&self, repository: &str, path: &str) -> String {
        format!("{}/v2/{}/{path}", self.url, repository.trim_matches('/'))
    }
}

fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Authentication methods for registry access.
#[derive(Clone)]
pub enum RegistryAuth {
    /// No authentication (for local development registries).
    None,

    /// Basic authentication with a pre-encoded `user:password` token, as kept
    /// in a Docker credential store.
    Basic {
        /// Base64-encoded `user:password`.
        token: String,
    },
}

impl RegistryAuth {
    /// Creates basic authentication from a pre-encoded token.
    ///
    /// # Examples
    ///
    /// ```
    /// use regprune_registry::RegistryAuth;
    ///
    /// let auth = RegistryAuth::basic("dXNlcjpwYXNz");
    /// assert_eq!(auth.header_value().as_deref(), Some("Basic dXNlcjpwYXNz"));
    /// ```
    #[must_use]
    pub fn basic(token: impl Into<String>) -> Self {
        Self::Basic {
            token: token.into(),
        }
    }

    /// Returns the `Authorization` header value, if any.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Basic { token } => Some(format!("Basic {token}")),
        }
    }
}

impl std::fmt::Debug for RegistryAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Basic { .. } => f.debug_struct("Basic").field("token", &"<redacted>").finish(),
        }
    }
}
