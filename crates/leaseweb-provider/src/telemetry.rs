//! Logging bootstrap
//!
//! Builds the `tracing` subscriber used by the plugin process. Output goes to
//! stderr (stdout belongs to the host handshake) through a
//! [`MaskingMakeWriter`], so secrets registered with the provider's
//! [`SecretMask`] never reach the log.
//!
//! # Environment
//!
//! - `LEASEWEB_PROVIDER_LOG`: filter directives, e.g. `debug` or
//!   `leaseweb_provider=trace` (default: `info`)
//! - `LEASEWEB_PROVIDER_LOG_FORMAT`: `text` or `json` (default: `text`)

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use leaseweb_provider_config::{EnvironmentReader, EnvironmentReaderExt};

use crate::masking::{MaskingMakeWriter, SecretMask};

/// Variable holding the log filter directives
pub const LOG_FILTER_ENV: &str = "LEASEWEB_PROVIDER_LOG";
/// Variable selecting the log format
pub const LOG_FORMAT_ENV: &str = "LEASEWEB_PROVIDER_LOG_FORMAT";

/// Telemetry errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    #[error("Failed to install subscriber: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Output format of log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line records
    #[default]
    Text,
    /// One JSON object per record
    Json,
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directives
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    /// Create config from environment variables
    ///
    /// An unrecognised format falls back to text.
    pub fn from_env(env: &dyn EnvironmentReader) -> Self {
        let defaults = Self::default();
        Self {
            filter: env.non_empty_var(LOG_FILTER_ENV).unwrap_or(defaults.filter),
            format: env
                .non_empty_var(LOG_FORMAT_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.format),
        }
    }

    /// Set the filter directives
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Build a subscriber writing masked records to `writer`
pub fn build_subscriber<W>(
    config: &LoggingConfig,
    mask: SecretMask,
    writer: W,
) -> Result<Box<dyn Subscriber + Send + Sync>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(&config.filter)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(MaskingMakeWriter::new(writer, mask))
        .with_ansi(false)
        .with_target(false);

    Ok(match config.format {
        LogFormat::Text => Box::new(builder.finish()),
        LogFormat::Json => Box::new(builder.json().finish()),
    })
}

/// Install the process-wide subscriber on stderr
///
/// Records are masked with [`SecretMask::global`].
pub fn init(config: &LoggingConfig) -> Result<()> {
    let subscriber = build_subscriber(config, SecretMask::global().clone(), std::io::stderr)?;
    tracing::subscriber::set_global_default(subscriber)?;
    tracing::debug!(format = %config.format, "Logging initialised");
    Ok(())
}
