//! CLI configuration

use std::time::Duration;

use clap::{Args, Parser};
use storefront_app::provider::{DEFAULT_IMAGE_BUCKET, ProviderConfig};

use crate::commands::Commands;

/// Storefront command line client
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    /// Provider connection settings.
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse arguments after loading `.env`, if present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Provider settings.
#[derive(Debug, Args)]
pub(crate) struct ProviderArgs {
    /// Provider base URL
    #[arg(long, env = "STOREFRONT_URL")]
    pub url: String,

    /// Public anonymous key
    #[arg(long, env = "STOREFRONT_ANON_KEY", hide_env_values = true)]
    pub anon_key: String,

    /// Storage bucket holding product images
    #[arg(long, env = "STOREFRONT_STORAGE_BUCKET", default_value = DEFAULT_IMAGE_BUCKET)]
    pub storage_bucket: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "STOREFRONT_HTTP_TIMEOUT_SECONDS", default_value_t = 30)]
    pub http_timeout_seconds: u64,
}

impl From<ProviderArgs> for ProviderConfig {
    fn from(args: ProviderArgs) -> Self {
        Self {
            url: args.url,
            anon_key: args.anon_key,
            image_bucket: args.storage_bucket,
            timeout: Duration::from_secs(args.http_timeout_seconds),
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Account used by commands that need a signed-in user.
#[derive(Debug, Args)]
pub(crate) struct Credentials {
    /// Account email
    #[arg(long, env = "STOREFRONT_EMAIL")]
    pub email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
}
