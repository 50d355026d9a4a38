//! Error types for the Sendpulse client

use thiserror::Error;

/// Result type alias for Sendpulse client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Sendpulse client
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials are missing at token-request time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The token endpoint rejected the credentials or answered without a token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API answered with an error payload
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No endpoint group with that name
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// No descriptor with that name exists in the namespace
    #[error("Unknown operation: {namespace}.{operation}")]
    UnknownOperation { namespace: String, operation: String },

    /// HTTP verb not supported by the API
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),
}

impl Error {
    /// Error code carried by an API error payload, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Configuration(_))
    }

    /// Copy of a failed token refresh, handed to callers that waited on it.
    ///
    /// Transport and JSON failures cannot be cloned and come back as
    /// [`Error::Auth`] carrying their message.
    pub(crate) fn for_waiter(&self) -> Error {
        match self {
            Error::Configuration(m) => Error::Configuration(m.clone()),
            Error::Auth(m) => Error::Auth(m.clone()),
            Error::Api { code, message } => Error::Api {
                code: code.clone(),
                message: message.clone(),
            },
            Error::UnknownNamespace(n) => Error::UnknownNamespace(n.clone()),
            Error::UnknownOperation {
                namespace,
                operation,
            } => Error::UnknownOperation {
                namespace: namespace.clone(),
                operation: operation.clone(),
            },
            Error::InvalidMethod(m) => Error::InvalidMethod(m.clone()),
            Error::Http(_) | Error::Json(_) => Error::Auth(self.to_string()),
        }
    }
}
