//! Category and level based logger used for container diagnostics.
//!
//! Nothing is written until a [`Logger`] is installed with [`set_logger`],
//! the `log_*!` macros are no-ops until then.

use core::{
    fmt::{self, Display, Arguments, Write as _},
    sync::atomic::{AtomicU8, self},
    time::Duration,
};
use std::{
    io::{self, Write},
    time::{SystemTime, UNIX_EPOCH},
};
use parking_lot::{Mutex, RwLock, const_mutex, const_rwlock};

// The lock does not guard the logger itself, it only makes the global logger set-able from any thread
static LOGGER : RwLock<Option<&'static Logger>> = const_rwlock(None);

/// Install the global logger used by the `log_*!` macros.
pub fn set_logger(logger: &'static Logger) {
    *LOGGER.write() = Some(logger);
}

/// Get the global logger, if one was set.
pub fn get_logger() -> Option<&'static Logger> {
    *LOGGER.read()
}

/// Logging level
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    /// The operation could not be completed
    Error,
    /// The operation completed, but not the way it was asked, e.g. a buffer that could not be resized
    Warning,
    /// General info
    Info,
    /// Bookkeeping of the containers, like every resize of their storage
    Verbose,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error   => f.write_str("\x1B[91m[ERROR  ]\x1B[0m"),
            LogLevel::Warning => f.write_str("\x1B[93m[WARNING]\x1B[0m"),
            LogLevel::Info    => f.write_str("\x1B[37m[INFO   ]\x1B[0m"),
            LogLevel::Verbose => f.write_str("\x1B[90m[VERBOSE]\x1B[0m"),
        }
    }
}

/// Log category, the name of the component a message comes from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogCategory(&'static str);

impl LogCategory {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

impl Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Wall-clock time at which a message was logged, in seconds and milliseconds since the unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TimeStamp(Duration);

impl Display for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.0.as_secs(), self.0.subsec_millis())
    }
}

/// Get the current timestamp
pub fn get_timestamp() -> TimeStamp {
    // A clock set before the epoch is not worth failing a log over
    TimeStamp(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Where and when a message was logged
pub struct LogLocation {
    file : &'static str,
    line : u32,
    time : TimeStamp,
}

impl LogLocation {
    pub const fn new(file: &'static str, line: u32, time: TimeStamp) -> Self {
        Self { file, line, time }
    }

    pub const fn file(&self) -> &str {
        self.file
    }

    pub const fn line(&self) -> u32 {
        self.line
    }

    pub const fn timestamp(&self) -> TimeStamp {
        self.time
    }
}

// Only warnings and errors point at their source
struct LogLocationFormatter<'a> {
    loc   : &'a LogLocation,
    level : LogLevel
}

impl Display for LogLocationFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Error |
            LogLevel::Warning => write!(f, " ({}:{})", self.loc.file(), self.loc.line()),
            LogLevel::Info |
            LogLevel::Verbose => Ok(()),
        }
    }
}

#[macro_export]
macro_rules! log_location {
    () => {
        $crate::LogLocation::new(file!(), line!(), $crate::get_timestamp())
    };
}

/// Boxed writer the logger can forward its output to
pub type LogWriter = Box<dyn Write + Send>;

/// Maximum number of writers a logger can forward to
pub const MAX_WRITERS: usize = 8;

struct LoggerState {
    writers:        [Option<LogWriter>; MAX_WRITERS],
    cache:          String,
    always_flush:   bool,
    log_to_console: bool,
}

impl LoggerState {
    const CACHE_FLUSH_LIMIT: usize = 4 * 1024;

    const fn new() -> Self {
        Self {
            writers: [None, None, None, None, None, None, None, None],
            cache: String::new(),
            always_flush: false,
            log_to_console: true,
        }
    }

    fn push_message(&mut self, message: Arguments) {
        _ = self.cache.write_fmt(message);
        if self.always_flush || self.cache.len() > Self::CACHE_FLUSH_LIMIT {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.cache.is_empty() {
            return;
        }

        if self.log_to_console {
            _ = io::stderr().write_all(self.cache.as_bytes());
        }
        for writer in self.writers.iter_mut().flatten() {
            _ = writer.write_all(self.cache.as_bytes());
            _ = writer.flush();
        }
        self.cache.clear();
    }
}

/// Logger
///
/// Messages are cached and written to the console and up to [`MAX_WRITERS`] writers once the cache fills up,
/// on `flush`, or after every message when `always_flush` is set.
pub struct Logger {
    state: Mutex<LoggerState>,
    max_log_level: AtomicU8,
}

impl Logger {
    pub const fn new() -> Self {
        Self {
            state: const_mutex(LoggerState::new()),
            max_log_level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Set the maximum log level (error == lowest, verbose == highest)
    pub fn set_max_level(&self, level: LogLevel) {
        self.max_log_level.store(level as u8, atomic::Ordering::Relaxed)
    }

    /// Check if a message at `level` would be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.max_log_level.load(atomic::Ordering::Relaxed)
    }

    /// Set whether the logger should flush after each message
    pub fn set_always_flush(&self, always_flush: bool) {
        self.state.lock().always_flush = always_flush;
    }

    /// Set whether the logger should log its output to the console
    pub fn set_log_to_console(&self, log_to_console: bool) {
        let mut state = self.state.lock();

        // Flush first, messages logged before this call keep their old destination
        state.flush();
        state.log_to_console = log_to_console;
    }

    /// Add a writer.
    ///
    /// Returns `Ok(index)` if space was available, the index can be used to remove the writer later on.
    /// Otherwise the writer is handed back.
    pub fn add_writer(&self, writer: LogWriter) -> Result<usize, LogWriter> {
        let mut state = self.state.lock();
        let empty = state.writers.iter().position(Option::is_none);
        match empty {
            Some(id) => {
                state.writers[id] = Some(writer);
                Ok(id)
            },
            None => Err(writer),
        }
    }

    /// Remove a writer from the logger
    pub fn remove_writer(&self, index: usize) -> Option<LogWriter> {
        self.state.lock().writers.get_mut(index).and_then(Option::take)
    }

    /// Log a message
    pub fn log(&self, category: LogCategory, level: LogLevel, loc: LogLocation, message: Arguments) {
        if self.is_enabled(level) {
            let location = LogLocationFormatter { loc: &loc, level };
            let timestamp = loc.timestamp();
            self.state.lock().push_message(format_args!("\x1B[38m{timestamp}\x1B[0m {level} [{category}]{location}: {message}\n"));
        }
    }

    pub fn flush(&self) {
        self.state.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $($arg:tt)+) => {
        if let Some(logger) = $crate::get_logger() {
            logger.log($category, $level, $crate::log_location!(), format_args!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Verbose, $($arg)+)
    };
}
