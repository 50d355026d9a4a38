//! # Sendpulse client for Rust
//!
//! Client for the Sendpulse REST API.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client credentials with a cached token that is
//!   refreshed lazily, one refresh at a time
//! - **Endpoint namespaces**: address books, campaigns, templates, senders,
//!   emails, blacklist and balance, generated from static descriptor tables
//! - **Error mapping**: error payloads become [`Error::Api`] with the
//!   `"{code}: {message}"` message the API documents
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sendpulse::{Client, Config};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default().with_credentials("client_id", "client_secret");
//!     let client = Client::new(config)?;
//!
//!     let books = client.addressbooks().get(json!({"limit": 10})).await?;
//!     println!("{}", books);
//!
//!     let book = client.addressbooks().get_one(json!({"id": 42})).await?;
//!     println!("{}", book);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod methods;
pub mod request;
pub mod response;
pub mod serialize;
pub mod transport;

// Re-export main types
pub use auth::{Credentials, Token, TokenManager};
pub use client::Client;
pub use config::{Config, DEFAULT_HOST};
pub use error::{Error, Result};
pub use methods::{MethodDescriptor, Namespace};
pub use response::ApiOutcome;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
