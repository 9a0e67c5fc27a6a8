//! Log output module
//!
//! Routes log lines to stdout/stderr or to configured files. Sinks are
//! fixed at startup; before initialization callers fall back to the
//! process streams.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

/// Global sink pair, set once at startup
static SINKS: OnceLock<LogSinks> = OnceLock::new();

/// Where a log stream ends up
enum LogSink {
    /// Inherit the process stdout
    Stdout,
    /// Inherit the process stderr
    Stderr,
    /// Append to a file
    File(Mutex<File>),
}

impl LogSink {
    /// Build a sink from an optional file path, falling back to `console`
    fn from_path(path: Option<&str>, console: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_append(p)?))),
            None => Ok(console),
        }
    }

    fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Stderr => eprintln!("{line}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Paired access/error log sinks
pub struct LogSinks {
    access: LogSink,
    error: LogSink,
}

impl LogSinks {
    /// Write to the access log
    pub fn write_access(&self, line: &str) {
        self.access.write_line(line);
    }

    /// Write an info message (shares the access log sink)
    pub fn write_info(&self, line: &str) {
        self.access.write_line(line);
    }

    /// Write to the error log
    pub fn write_error(&self, line: &str) {
        self.error.write_line(line);
    }
}

/// Open a log file for appending, creating parent directories as needed
fn open_append(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global log sinks
///
/// Should be called once at application startup. Returns an error if a log
/// file cannot be opened or the sinks are already set.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let sinks = LogSinks {
        access: LogSink::from_path(access_log_file, LogSink::Stdout)?,
        error: LogSink::from_path(error_log_file, LogSink::Stderr)?,
    };
    SINKS.set(sinks).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log sinks
///
/// Panics if `init()` has not been called.
pub fn get() -> &'static LogSinks {
    SINKS
        .get()
        .expect("Log writer not initialized. Call logger::init() first.")
}

/// Check if the log sinks have been initialized
pub fn is_initialized() -> bool {
    SINKS.get().is_some()
}
