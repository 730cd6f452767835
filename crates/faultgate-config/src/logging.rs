use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_FILE_PATH: &str = "logs/log-.txt";
const DEFAULT_SERVER_URL: &str = "http://localhost:5341";
const DEFAULT_RETAINED_FILE_COUNT: usize = 7;
const UNKNOWN_APPLICATION: &str = "UnknownApp";

/// Ordered log severity, least severe first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[serde(alias = "trace")]
    Verbose,
    Debug,
    #[default]
    #[serde(alias = "info")]
    Information,
    #[serde(alias = "warn")]
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Closest `tracing` filter
    ///
    /// `tracing` has no level above error, so `Fatal` turns every event off;
    /// no error-level event reaches a sink at that threshold.
    pub const fn as_level_filter(self) -> LevelFilter {
        match self {
            Self::Verbose => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Information => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Fatal => LevelFilter::OFF,
        }
    }

    /// Level name as understood by `EnvFilter` directives
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Verbose => "trace",
            Self::Debug => "debug",
            Self::Information => "info",
            Self::Warning => "warn",
            Self::Error => "error",
            Self::Fatal => "off",
        }
    }
}

/// How often the file sink starts a new file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollingInterval {
    Minute,
    Hour,
    #[default]
    Day,
    /// Keep writing to a single file
    #[serde(alias = "infinite")]
    Never,
}

/// Rolling file sink
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSinkOptions {
    /// Path template; the date is inserted between stem and extension
    #[serde(default = "default_file_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub rolling_interval: RollingInterval,
    /// Number of rolled files kept on disk, `None` keeps all of them
    #[serde(default = "default_retained_file_count")]
    pub retained_file_count: Option<usize>,
}

impl FileSinkOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn rolling(mut self, interval: RollingInterval) -> Self {
        self.rolling_interval = interval;
        self
    }

    #[must_use]
    pub fn retain(mut self, count: Option<usize>) -> Self {
        self.retained_file_count = count;
        self
    }
}

impl Default for FileSinkOptions {
    fn default() -> Self {
        Self {
            path: default_file_path(),
            rolling_interval: RollingInterval::default(),
            retained_file_count: default_retained_file_count(),
        }
    }
}

/// Network log collector sink (Seq, via its OTLP ingestion endpoint)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSinkOptions {
    #[serde(default = "default_server_url")]
    pub server_url: Url,
    /// Sent as `X-Seq-ApiKey` when present
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

impl NetworkSinkOptions {
    pub fn new(server_url: Url) -> Self {
        Self {
            server_url,
            api_key: None,
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }
}

impl Default for NetworkSinkOptions {
    fn default() -> Self {
        Self::new(default_server_url())
    }
}

/// Logging configuration
///
/// Sinks are additive. With no sink enabled the effective threshold is
/// [`LogLevel::Fatal`] and nothing is written anywhere.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingOptions {
    #[serde(default)]
    pub minimum_level: LogLevel,
    #[serde(default)]
    pub file: Option<FileSinkOptions>,
    #[serde(default)]
    pub network: Option<NetworkSinkOptions>,
    /// Reported to the network collector as the service name
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            minimum_level: LogLevel::default(),
            file: None,
            network: None,
            application_name: default_application_name(),
        }
    }
}

impl LoggingOptions {
    pub fn builder() -> LoggingOptionsBuilder {
        LoggingOptionsBuilder::default()
    }

    pub const fn has_any_sink(&self) -> bool {
        self.file.is_some() || self.network.is_some()
    }

    /// Threshold actually applied once sink selection is taken into account
    pub const fn effective_level(&self) -> LogLevel {
        if self.has_any_sink() {
            self.minimum_level
        } else {
            LogLevel::Fatal
        }
    }

    /// Check sink parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the file path has no file name, the retention
    /// count is zero, or the collector URL is not http(s)
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref file) = self.file {
            if file.path.file_name().is_none() {
                anyhow::bail!("logging.file.path must name a file: `{}`", file.path.display());
            }

            if file.retained_file_count == Some(0) {
                anyhow::bail!("logging.file.retained_file_count must be greater than 0");
            }
        }

        if let Some(ref network) = self.network
            && !matches!(network.server_url.scheme(), "http" | "https")
        {
            anyhow::bail!(
                "logging.network.server_url must use http or https: `{}`",
                network.server_url
            );
        }

        if self.application_name.trim().is_empty() {
            anyhow::bail!("logging.application_name must not be empty");
        }

        Ok(())
    }
}

/// Builder producing validated, immutable [`LoggingOptions`]
#[derive(Debug, Default)]
pub struct LoggingOptionsBuilder {
    options: LoggingOptions,
}

impl LoggingOptionsBuilder {
    #[must_use]
    pub fn with_file(mut self, file: FileSinkOptions) -> Self {
        self.options.file = Some(file);
        self
    }

    #[must_use]
    pub fn with_network(mut self, network: NetworkSinkOptions) -> Self {
        self.options.network = Some(network);
        self
    }

    #[must_use]
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.options.minimum_level = level;
        self
    }

    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.options.application_name = name.into();
        self
    }

    /// Validate and freeze the options
    ///
    /// # Errors
    ///
    /// Returns an error if [`LoggingOptions::validate`] fails
    pub fn build(self) -> anyhow::Result<LoggingOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}

fn default_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_PATH)
}

#[allow(clippy::unnecessary_wraps)]
fn default_retained_file_count() -> Option<usize> {
    Some(DEFAULT_RETAINED_FILE_COUNT)
}

fn default_server_url() -> Url {
    Url::parse(DEFAULT_SERVER_URL).expect("default server url must parse")
}

/// Name of the running executable, or a placeholder when unavailable
pub fn default_application_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_APPLICATION.to_owned())
}
