//! # Logger
//!
//! Installs the global `tracing` subscriber for the scribe binaries.
//!
//! Console output goes to **stderr** so that command output on stdout (ciphertexts,
//! IVs, decrypted text) can be piped without log noise. An optional rolling log file
//! can be added, in compact or JSON format. `RUST_LOG` still overrides the configured
//! level when no explicit filter is set.
//!
//! ## Example
//!
//! ```rust
//! # use scribe_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("scribe")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Output format of the file layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LoggerError::invalid(format!("Unknown log format '{other}'"))),
        }
    }
}

/// Parses a level name (`trace`, `debug`, `info`, `warn`, `error`, `off`).
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim())
        .map_err(|e| LoggerError::invalid(format!("Invalid log level '{level}': {e}")))
}

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    format: LogFormat,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::WARN,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            format: LogFormat::Compact,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and installing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the logger name, also used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { config: self.config, name: WithName(name.into()), file: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    /// Configures the maximum number of rotated log files to keep.
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Selects the file output format.
    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Configures the minimum level emitted when no explicit filter is given.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `scribe_cipher=trace,scribe=debug`).
    ///
    /// Invalid filters cause [`LoggerBuilder::init`] to fail.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables or disables the stderr console layer.
    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Writes logs to rolling files under `path`.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.path = Some(path.into());
        LoggerBuilder { config, name: self.name, file: PhantomData }
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. Keep it alive until shutdown; dropping it flushes and
    /// stops the background file writer.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber is already set, and
    /// [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { config, name: WithName(name), .. } = self;
        validate_config(&config, &name)?;

        let env_filter = build_env_filter(&config)?;
        let mut layers = Vec::new();

        if config.console {
            layers.push(layer().compact().with_writer(io::stderr).with_ansi(true).boxed());
        }

        let guard = if let Some(path) = config.path {
            fs::create_dir_all(&path).map_err(|source| LoggerError::Io {
                source,
                context: Some(format!("Failed to create path: {}", path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(config.rotation)
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(path)?;

            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(non_blocking).with_ansi(false);

            layers.push(match config.format {
                LogFormat::Compact => file_layer.boxed(),
                LogFormat::Json => file_layer.json().boxed(),
            });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid("No logging layers enabled. Enable console or file output."));
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed logging system.
///
/// Holds the background worker guard of the file writer, if any.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    ///
    /// ```rust
    /// use scribe_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder().name("scribe").level(LevelFilter::INFO).init().unwrap();
    /// ```
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName, file: PhantomData }
    }

    /// Returns the file writer guard, if file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("Logger name cannot be empty"));
    }

    if config.max_files == 0 {
        return Err(LoggerError::invalid("max_files must be greater than zero"));
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder
                .parse(filter)
                .map_err(|e| LoggerError::invalid(format!("Invalid env filter '{filter}': {e}")))
        },
    )
}
