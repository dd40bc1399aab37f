//! The two application log sinks.
//!
//! Both sinks emit `tracing` events on dedicated targets. How the events are
//! formatted and where they are written is decided by whoever installs the
//! subscriber (see `brisk_adapters::logging`); this module only emits.

use std::fmt;
use std::panic::Location;

/// Target of events written through [`InfoLog`].
pub const INFO_TARGET: &str = "brisk::info";

/// Target of events written through [`ErrorLog`].
pub const ERROR_TARGET: &str = "brisk::error";

/// Informational sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoLog;

impl InfoLog {
    pub fn log(&self, message: impl fmt::Display) {
        tracing::info!(target: INFO_TARGET, "{message}");
    }
}

/// Error sink. Every line carries the `file:line` of the logging call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLog;

impl ErrorLog {
    #[track_caller]
    pub fn log(&self, message: impl fmt::Display) {
        let caller = Location::caller();
        tracing::error!(
            target: ERROR_TARGET,
            "{}:{}: {message}",
            short_file(caller.file()),
            caller.line()
        );
    }
}

/// Informational and error sinks handed out by a `LoggerFactory`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loggers {
    pub info: InfoLog,
    pub error: ErrorLog,
}

// Final path component only.
fn short_file(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
