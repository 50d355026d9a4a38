//! High-level Sendpulse client

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::auth::{Credentials, TokenManager};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::methods::{
    AddressBooks, Balance, Blacklist, Campaigns, Emails, Namespace, Senders, Templates,
};
use crate::request::RequestBuilder;
use crate::response;
use crate::transport::{HttpMethod, ReqwestTransport, Transport};

/// Sendpulse API client
///
/// Cheap to clone; clones share the transport and the token cache.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    host: String,
    transport: Arc<dyn Transport>,
    tokens: TokenManager,
}

impl Client {
    /// Create a client that talks HTTP through `reqwest`
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client on top of a caller-supplied transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let credentials = Credentials {
            id: config.id.clone(),
            secret: config.secret.clone(),
        };
        let tokens = TokenManager::new(config.token_url(), credentials, transport.clone());

        Self {
            inner: Arc::new(Inner {
                host: config.host,
                transport,
                tokens,
            }),
        }
    }

    /// Get the base URL
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Replace the credentials. The cached token stays until it expires.
    pub fn set_credentials(&self, id: impl Into<String>, secret: impl Into<String>) {
        self.inner.tokens.set_credentials(Credentials {
            id: Some(id.into()),
            secret: Some(secret.into()),
        });
    }

    /// Build, send and check one API call
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: Value,
        serialize_fields: &[&str],
    ) -> Result<Value> {
        let request = RequestBuilder::new(&self.inner.host, &self.inner.tokens)
            .build(method, path, &params, serialize_fields)
            .await?;

        debug!(%method, path, "Sending API request");
        let response = self.inner.transport.send(request).await?;
        debug!(%method, path, status = response.status, "API response received");

        response::check(response.body)
    }

    /// Call an operation chosen at runtime
    pub async fn call(&self, namespace: Namespace, operation: &str, params: Value) -> Result<Value> {
        let descriptor =
            namespace
                .descriptor(operation)
                .ok_or_else(|| Error::UnknownOperation {
                    namespace: namespace.name().to_string(),
                    operation: operation.to_string(),
                })?;

        self.request(descriptor.method, descriptor.path, params, descriptor.serialize)
            .await
    }

    pub fn addressbooks(&self) -> AddressBooks<'_> {
        AddressBooks::new(self)
    }

    pub fn campaigns(&self) -> Campaigns<'_> {
        Campaigns::new(self)
    }

    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    pub fn senders(&self) -> Senders<'_> {
        Senders::new(self)
    }

    pub fn emails(&self) -> Emails<'_> {
        Emails::new(self)
    }

    pub fn blacklist(&self) -> Blacklist<'_> {
        Blacklist::new(self)
    }

    pub fn balance(&self) -> Balance<'_> {
        Balance::new(self)
    }
}
