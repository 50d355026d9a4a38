//! Client configuration

use std::fmt;
use std::time::Duration;

/// Host used when no other host is configured
pub const DEFAULT_HOST: &str = "https://api.sendpulse.com/";

/// Path of the OAuth2 token endpoint, relative to the host
pub const TOKEN_PATH: &str = "oauth/access_token";

/// Configuration for the Sendpulse client
#[derive(Clone)]
pub struct Config {
    /// Base URL for the API, always ending in `/`
    pub host: String,

    /// OAuth2 client ID
    pub id: Option<String>,

    /// OAuth2 client secret
    pub secret: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a new configuration with the given host
    pub fn new(host: impl Into<String>) -> Self {
        let mut host = host.into();
        if !host.ends_with('/') {
            host.push('/');
        }

        Self {
            host,
            id: None,
            secret: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("sendpulse-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set OAuth2 client credentials
    pub fn with_credentials(mut self, id: impl Into<String>, secret: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self.secret = Some(secret.into());
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Absolute URL of the token endpoint
    pub fn token_url(&self) -> String {
        format!("{}{}", self.host, TOKEN_PATH)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_host_is_sendpulse() {
        let config = Config::default();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.token_url(), "https://api.sendpulse.com/oauth/access_token");
    }

    #[test]
    fn host_gets_trailing_slash() {
        let config = Config::new("http://localhost:8080");
        assert_eq!(config.host, "http://localhost:8080/");
    }

    #[test]
    fn debug_hides_secret() {
        let config = Config::default().with_credentials("id", "hunter2");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
