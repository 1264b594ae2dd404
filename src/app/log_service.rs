// iTermKit - app/log_service.rs
//
// The event log: append-only, timestamped, one record per line.
//
//   DEBUG -- [2024-03-07 04:05:09] -- message
//
// Components never look a logger up; they receive `&dyn EventLog` from the
// caller. `FileLogger` is the only implementation shipped; unit tests use an
// in-memory `MemoryLog` to inspect what a component logged.
//
// Failure policy:
//   - `log` never panics and never returns an error; it reports `false` and
//     emits a diagnostic on the console (tracing, stderr).
//   - The file is opened per record and dropped before `try_log` returns, on
//     success and on every error path.
//   - Appends are not locked against other processes.
//   - The log directory must already exist.

use crate::core::model::{LogLevel, LogRecord};
use crate::util::error::LogError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink for event log records.
pub trait EventLog {
    /// Append `message` at `level`. Returns whether the record was stored.
    fn log(&self, message: &str, level: LogLevel) -> bool;

    fn debug(&self, message: &str) -> bool {
        self.log(message, LogLevel::Debug)
    }

    fn info(&self, message: &str) -> bool {
        self.log(message, LogLevel::Info)
    }

    fn warn(&self, message: &str) -> bool {
        self.log(message, LogLevel::Warn)
    }

    fn error(&self, message: &str) -> bool {
        self.log(message, LogLevel::Error)
    }
}

// =============================================================================
// FileLogger
// =============================================================================

/// Event log backed by a single append-only file.
#[derive(Debug, Default, Clone)]
pub struct FileLogger {
    path: Option<PathBuf>,
}

impl FileLogger {
    /// Logger with no path; every write fails until `set_log_path` is called.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Target all subsequent writes at `path`. No I/O happens here.
    pub fn set_log_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(path = %path.display(), "Event log path set");
        self.path = Some(path);
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Fallible form of [`EventLog::log`].
    pub fn try_log(&self, message: &str, level: LogLevel) -> Result<(), LogError> {
        self.write_record(&LogRecord::new(level, message))
    }

    /// Append an already-built record.
    pub fn write_record(&self, record: &LogRecord) -> Result<(), LogError> {
        let path = self.path.as_deref().ok_or(LogError::PathNotConfigured)?;
        let io_err = |source| LogError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_err)?;
        writeln!(file, "{}", record.render()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        Ok(())
    }
}

impl EventLog for FileLogger {
    fn log(&self, message: &str, level: LogLevel) -> bool {
        match self.try_log(message, level) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, level = %level, "Event log write failed");
                false
            }
        }
    }
}

// =============================================================================
// MemoryLog (test support)
// =============================================================================

/// Event log that keeps records in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemoryLog {
    records: std::cell::RefCell<Vec<LogRecord>>,
}

#[cfg(test)]
impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.borrow().clone()
    }

    /// Messages logged at exactly `level`, oldest first.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|r| r.level() == level)
            .map(|r| r.message().to_string())
            .collect()
    }
}

#[cfg(test)]
impl EventLog for MemoryLog {
    fn log(&self, message: &str, level: LogLevel) -> bool {
        self.records.borrow_mut().push(LogRecord::new(level, message));
        true
    }
}
