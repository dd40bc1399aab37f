//! Log sinks for the two application loggers.
//!
//! `brisk-core` only emits events on [`INFO_TARGET`] and [`ERROR_TARGET`];
//! the layers built here turn them into lines on stdout (or stderr, when
//! stdout carries a command's payload):
//!
//! ```text
//! INFO    2024/01/02 15:04:05 myapp initialized
//! ERROR   2024/01/02 15:04:05 extended.rs:88: error getting template missing.jet: not found
//! ```
//!
//! Each sink is its own per-layer-filtered layer. Register both directly on
//! the registry so no other layer's filter can narrow them:
//!
//! ```ignore
//! tracing_subscriber::registry()
//!     .with(info_sink(SinkStream::Stdout))
//!     .with(error_sink(SinkStream::Stdout))
//!     .with(diagnostics)
//!     .try_init()?;
//! ```
//!
//! Any other target is ignored by these layers; diagnostics are the CLI's
//! concern.

use std::io::{self, IsTerminal as _};

use brisk_core::application::ports::LoggerFactory;
use brisk_core::domain::{ERROR_TARGET, INFO_TARGET, Loggers};
use tracing::{Level, Subscriber, debug};
use tracing_subscriber::{
    Layer,
    filter::{Filtered, Targets},
    fmt::{
        self,
        format::{DefaultFields, Format, Full},
        time::ChronoLocal,
        writer::BoxMakeWriter,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Timestamp layout shared by both sinks: local date and time to the second.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Stream a sink writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SinkStream {
    #[default]
    Stdout,
    Stderr,
}

impl SinkStream {
    fn writer(self) -> BoxMakeWriter {
        match self {
            Self::Stdout => BoxMakeWriter::new(io::stdout),
            Self::Stderr => BoxMakeWriter::new(io::stderr),
        }
    }

    fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => io::stdout().is_terminal(),
            Self::Stderr => io::stderr().is_terminal(),
        }
    }
}

/// A sink: a fmt layer restricted to one target and level.
pub type SinkLayer<S> =
    Filtered<fmt::Layer<S, DefaultFields, Format<Full, ChronoLocal>, BoxMakeWriter>, Targets, S>;

/// Layer for the info sink.
pub fn info_sink<S>(stream: SinkStream) -> SinkLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    sink_layer(stream, INFO_TARGET, Level::INFO)
}

/// Layer for the error sink.
pub fn error_sink<S>(stream: SinkStream) -> SinkLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    sink_layer(stream, ERROR_TARGET, Level::ERROR)
}

fn sink_layer<S>(stream: SinkStream, target: &'static str, level: Level) -> SinkLayer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(stream.writer())
        .with_ansi(stream.is_terminal())
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned()))
        .with_filter(Targets::new().with_target(target, level))
}

/// Installs both sinks on stdout as the global subscriber, unless one is
/// already set, and hands out the two loggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutLoggerFactory;

impl StdoutLoggerFactory {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerFactory for StdoutLoggerFactory {
    fn build(&self) -> Loggers {
        // An existing subscriber (the CLI's, or a test harness) keeps working;
        // it is expected to include the sink layers itself.
        if let Err(e) = tracing_subscriber::registry()
            .with(info_sink(SinkStream::Stdout))
            .with(error_sink(SinkStream::Stdout))
            .try_init()
        {
            debug!("Log sinks not installed: {e}");
        }
        Loggers::default()
    }
}
