//! Sendpulse command-line client
//!
//! Calls any operation of the client by namespace and operation name and
//! prints the response body as JSON.
//!
//! ```text
//! sendpulse-cli list
//! sendpulse-cli call addressbooks getOne --params '{"id": 42}'
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SENDPULSE_CONFIG` | - | Path to a TOML config file |
//! | `SENDPULSE_ID` | - | OAuth2 client id |
//! | `SENDPULSE_SECRET` | - | OAuth2 client secret |
//! | `SENDPULSE_HOST` | `https://api.sendpulse.com/` | API base URL |
//! | `SENDPULSE_TIMEOUT_MS` | `30000` | Request timeout in milliseconds |
//! | `LOG_FORMAT` | text | `json` for JSON log lines |
//! | `RUST_LOG` | `warn` | Log level |

mod logging;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use sendpulse::{Client, Config, Namespace};
use sendpulse_config::{ConfigLoader, SendpulseConfig};

#[derive(Debug, Parser)]
#[command(name = "sendpulse-cli", version, about = "Sendpulse REST API client")]
struct Cli {
    /// TOML configuration file; must exist. Without it `SENDPULSE_CONFIG`
    /// and the standard paths are searched.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Client id (overrides config file and environment)
    #[arg(long)]
    id: Option<String>,

    /// Client secret (overrides config file and environment)
    #[arg(long)]
    secret: Option<String>,

    /// API base URL
    #[arg(long)]
    host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every namespace and operation
    List,

    /// Call one operation
    Call {
        /// Namespace, e.g. `addressbooks`
        namespace: String,

        /// Operation name, e.g. `getOne`
        operation: String,

        /// Parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging("warn");

    let (namespace, operation, params) = match cli.command {
        Command::List => {
            print_operations();
            return Ok(());
        }
        Command::Call {
            namespace,
            operation,
            params,
        } => (namespace, operation, params),
    };

    let settings = config_loader(cli.config.as_deref())
        .load()?
        .sendpulse
        .with_overrides(cli.id, cli.secret, cli.host);
    settings.validate()?;
    debug!(?settings, "Configuration loaded");

    let namespace: Namespace = namespace.parse()?;
    let params: Value =
        serde_json::from_str(&params).context("--params must be a JSON document")?;

    let client = Client::new(client_config(&settings))?;
    let body = client.call(namespace, &operation, params).await?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn config_loader(path: Option<&Path>) -> ConfigLoader {
    match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    }
}

fn client_config(settings: &SendpulseConfig) -> Config {
    let mut config = Config::new(settings.normalized_host())
        .with_timeout(Duration::from_millis(settings.timeout_ms));
    config.id = settings.id.clone();
    config.secret = settings.secret.clone();
    if let Some(user_agent) = &settings.user_agent {
        config = config.with_user_agent(user_agent.clone());
    }
    config
}

fn print_operations() {
    for namespace in Namespace::ALL {
        for descriptor in namespace.descriptors() {
            println!(
                "{:<14} {:<22} {:<7} {}",
                namespace.name(),
                descriptor.name,
                descriptor.method,
                descriptor.path
            );
        }
    }
}
