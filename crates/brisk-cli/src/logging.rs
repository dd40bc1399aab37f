//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `brisk-core`
//! only *emits* spans and events, it never touches subscribers.
//!
//! Two kinds of output share one registry:
//!
//! - **Diagnostics** on stderr, filtered by the verbosity flags below.
//! - **Application sinks** (`brisk::info`, `brisk::error`) on the stream the
//!   command picks, built by `brisk_adapters::logging` and unaffected by
//!   `-v`/`-q`. Each sink is registered directly on the registry so the
//!   diagnostics filter never caps it.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use brisk_adapters::logging::{SinkStream, error_sink, info_sink};
use brisk_core::domain::{ERROR_TARGET, INFO_TARGET};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
pub fn init_logging(args: &GlobalArgs, sinks: SinkStream) -> anyhow::Result<()> {
    let filter = diagnostic_filter(
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        derive_level(args),
    );

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let diagnostics = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(info_sink(sinks))
        .with(error_sink(sinks))
        .with(diagnostics)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Filter for the stderr layer. The sink targets share the `brisk` prefix
/// and are switched off explicitly so they never print twice.
fn diagnostic_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    let directives = match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives.to_owned(),
        _ => format!("brisk={level},brisk_core={level},brisk_adapters={level},brisk_cli={level}"),
    };
    EnvFilter::new(format!("{directives},{INFO_TARGET}=off,{ERROR_TARGET}=off"))
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
