//! Error sinks and logging infrastructure.
//!
//! Every [`PathHandle`](crate::PathHandle) reports failures to an
//! [`ErrorSink`] before returning them. Three sinks ship with the crate:
//!
//! - [`LogSink`] forwards to the `log` facade and backs [`default_sink`]
//! - [`Logger`] writes to stderr, filtered by a [`LogLevel`]
//! - [`MemorySink`] keeps records in memory for later inspection

use std::env;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::Level;

/// Environment variable consulted by [`init_logger`].
pub const LOG_MODE_ENV: &str = "PROPERPATH_LOG_MODE";

/// Destination for the diagnostics a path handle emits.
///
/// Implementations must be cheap to call and must never fail; a sink that
/// cannot deliver a message drops it.
pub trait ErrorSink: fmt::Debug + Send + Sync {
    /// Record `message` at `level`.
    fn log(&self, level: Level, message: &str);
}

/// Returns the process-wide default sink, a [`LogSink`] targeting `properpath`.
///
/// Handles created without an explicit sink share this instance.
#[must_use]
pub fn default_sink() -> Arc<dyn ErrorSink> {
    static DEFAULT: OnceLock<Arc<dyn ErrorSink>> = OnceLock::new();
    Arc::clone(DEFAULT.get_or_init(|| Arc::new(LogSink::default())))
}

/// Sink that forwards to the `log` crate facade.
///
/// # Examples
///
/// ```
/// use properpath::logging::{ErrorSink, LogSink};
///
/// let sink = LogSink::new("myapp::paths");
/// sink.log(log::Level::Debug, "nothing is printed without a log backend");
/// assert_eq!(sink.target(), "myapp::paths");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSink {
    target: String,
}

impl LogSink {
    /// Create a sink that logs under `target`.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The `log` target records are emitted under.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new("properpath")
    }
}

impl ErrorSink for LogSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target.as_str(), level, "{message}");
    }
}

/// Sink that keeps every record in memory.
///
/// # Examples
///
/// ```
/// use properpath::logging::{ErrorSink, MemorySink};
///
/// let sink = MemorySink::new();
/// sink.log(log::Level::Debug, "could not create /root/x");
/// assert_eq!(sink.messages(), vec!["could not create /root/x".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, m)| m).collect()
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ErrorSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message.to_string()));
    }
}

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use properpath::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info, and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use properpath::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// Whether a record at `level` passes this filter.
    #[must_use]
    pub fn allows(self, level: Level) -> bool {
        match level {
            Level::Error | Level::Warn => self >= Self::Normal,
            Level::Info | Level::Debug | Level::Trace => self >= Self::Verbose,
        }
    }
}

/// A simple stderr-based logger.
///
/// The logger respects the configured log level and only outputs messages
/// at or above that level. It doubles as an [`ErrorSink`], so it can be
/// handed to path handles directly.
///
/// # Examples
///
/// ```
/// use properpath::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.error("This is an error message");
/// logger.debug("This will not be printed (requires Verbose)");
/// ```
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Logs an error message unless the level is Quiet.
    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Logs a warning message at Normal and Verbose levels.
    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    /// Logs an informational message at Verbose level.
    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    /// Logs a debug message at Verbose level.
    ///
    /// # Examples
    ///
    /// ```
    /// use properpath::{Logger, LogLevel};
    ///
    /// let logger = Logger::new(LogLevel::Verbose);
    /// logger.debug("Created directory /tmp/cache");
    /// ```
    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn emit(&self, level: Level, message: &str) {
        if self.level.allows(level) {
            eprintln!("{}: {message}", level.as_str());
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl ErrorSink for Logger {
    fn log(&self, level: Level, message: &str) {
        self.emit(level, message);
    }
}

/// Initializes a logger based on environment variables and flags.
///
/// The priority order is:
/// 1. Flags (verbose/quiet)
/// 2. `PROPERPATH_LOG_MODE` environment variable
/// 3. Default (Normal)
///
/// If both `verbose` and `quiet` are true, `verbose` takes precedence.
///
/// # Examples
///
/// ```
/// use properpath::{init_logger, LogLevel};
///
/// let logger = init_logger(true, false);
/// assert_eq!(logger.level(), LogLevel::Verbose);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_ENV) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}
