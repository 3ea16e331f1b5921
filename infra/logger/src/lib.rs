//! # Logger
//!
//! Installs the global `tracing` subscriber for the e-invoice tools.
//!
//! * A compact, coloured console layer on stderr (on by default), leaving stdout
//!   to command output.
//! * An optional non-blocking rolling file layer, as text or JSON.
//! * An [`EnvFilter`] built from a default level, an optional directive string and
//!   any number of extra directives. `RUST_LOG` is honoured when no directive
//!   string is given.
//!
//! ## Example
//!
//! ```rust
//! # use ecinv_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("ecinv")
//!     .level(LevelFilter::DEBUG)
//!     .directive("ecinv::diagnostics=debug")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    filter: Option<String>,
    directives: Vec<String>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            filter: None,
            directives: Vec::new(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for the global tracing subscriber. A name is required before `init`.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl<N: Sealed> LoggerBuilder<N> {
    /// Minimum level for targets without a more specific directive.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Directive string such as `ecinv_client=debug,reqwest=warn`.
    ///
    /// Replaces `RUST_LOG`. Invalid strings make [`LoggerBuilder::init`] fail.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.config.filter = Some(filter.into());
        self
    }

    /// Adds one directive on top of the level and filter.
    #[must_use]
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.config.directives.push(directive.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Writes rolling log files into `directory`, creating it if needed.
    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(directory.into());
        self
    }

    /// Writes the file layer as JSON lines. No effect without a directory.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown so the file worker can flush.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] For an empty name, zero `max_files`,
    ///   an unparsable filter or directive, or when no layer is enabled.
    /// * [`LoggerError::Io`] If the log directory cannot be created.
    /// * [`LoggerError::Appender`] If the rolling appender cannot be built.
    /// * [`LoggerError::Subscriber`] If a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { config, name: WithName(name) } = self;
        validate_config(&config, &name)?;

        let env_filter = build_env_filter(&config)?;
        let mut layers = Vec::new();

        if config.console {
            layers.push(layer().compact().with_writer(std::io::stderr).with_ansi(true).boxed());
        }

        let guard = if let Some(directory) = config.directory {
            fs::create_dir_all(&directory)
                .context(format!("Failed to create {}", directory.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(config.rotation)
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(directory)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = layer().with_writer(writer).with_ansi(false);

            layers.push(if config.json { file_layer.json().boxed() } else { file_layer.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging layers enabled, enable console or a log directory".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed subscriber. Dropping it flushes the file worker.
#[must_use = "Dropping this handle stops the background log writer"]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Whether a file layer is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}

/// Parses a level name such as `info` or `DEBUG`.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid log level '{level}': {e}").into(),
        context: None,
    })
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());

    let mut filter = match &config.filter {
        Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid filter '{filter}': {e}").into(),
            context: None,
        })?,
        None => builder.from_env_lossy(),
    };

    for directive in &config.directives {
        let parsed = Directive::from_str(directive).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid directive '{directive}': {e}").into(),
            context: None,
        })?;
        filter = filter.add_directive(parsed);
    }

    Ok(filter)
}
