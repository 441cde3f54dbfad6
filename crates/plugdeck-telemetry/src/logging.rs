//! Logging configuration and subscriber setup.

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{TelemetryError, TelemetryResult};

fn init_err<E: std::fmt::Display>(e: E) -> TelemetryError {
    TelemetryError::InitError(e.to_string())
}

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines for structured log collection.
    Json,
}

/// Log output target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to stdout.
    Stdout,
    /// Log to stderr.
    #[default]
    Stderr,
}

/// Logging configuration.
///
/// Deserializes from the `[logging]` table of the deployer config. Every
/// field has a default, so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Base level filter (e.g. `info`, `debug`).
    #[serde(default = "default_level")]
    pub level: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
    /// Output stream.
    #[serde(default)]
    pub target: LogTarget,
    /// Whether to include timestamps.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Whether to use ANSI colors. Ignored for JSON output.
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Per-target directive overrides (e.g. `plugdeck_deploy=trace`).
    #[serde(default)]
    pub directives: Vec<String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            timestamps: true,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log target.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter = EnvFilter::try_new(&self.level)
            .map_err(|e| TelemetryError::ConfigError(e.to_string()))?;

        for directive in &self.directives {
            filter = filter.add_directive(directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| {
                    TelemetryError::ConfigError(e.to_string())
                },
            )?);
        }

        Ok(filter)
    }
}

/// A subscriber built from a [`LogConfig`], not yet installed.
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Build the subscriber described by `config` without installing it.
///
/// Useful for scoping output with [`tracing::subscriber::with_default`].
///
/// # Errors
///
/// Returns [`TelemetryError::ConfigError`] if the level or a directive does
/// not parse.
pub fn build_subscriber(config: &LogConfig) -> TelemetryResult<BoxedSubscriber> {
    let filter = config.build_filter()?;

    Ok(match config.target {
        LogTarget::Stdout => layered(filter, config, std::io::stdout),
        LogTarget::Stderr => layered(filter, config, std::io::stderr),
    })
}

/// Install a global subscriber built from `config`.
///
/// # Errors
///
/// Returns [`TelemetryError::ConfigError`] if the level or a directive does
/// not parse, and [`TelemetryError::InitError`] if a global subscriber is
/// already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    build_subscriber(config)?.try_init().map_err(init_err)
}

fn layered<W>(filter: EnvFilter, config: &LogConfig, writer: W) -> BoxedSubscriber
where
    W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);

    match (config.format, config.timestamps) {
        (LogFormat::Json, true) => Box::new(registry.with(fmt::layer().json().with_writer(writer))),
        (LogFormat::Json, false) => Box::new(
            registry.with(fmt::layer().json().without_time().with_writer(writer)),
        ),
        (LogFormat::Pretty, true) => Box::new(
            registry.with(fmt::layer().pretty().with_ansi(config.ansi).with_writer(writer)),
        ),
        (LogFormat::Pretty, false) => Box::new(
            registry.with(
                fmt::layer()
                    .pretty()
                    .without_time()
                    .with_ansi(config.ansi)
                    .with_writer(writer),
            ),
        ),
        (LogFormat::Compact, true) => Box::new(
            registry.with(fmt::layer().compact().with_ansi(config.ansi).with_writer(writer)),
        ),
        (LogFormat::Compact, false) => Box::new(
            registry.with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_ansi(config.ansi)
                    .with_writer(writer),
            ),
        ),
    }
}

/// Set up default logging (info level, stderr, pretty format).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

/// Route `tracing` output into the test harness's captured output.
///
/// Safe to call from every test: only the first call installs a subscriber,
/// later calls are ignored.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}
