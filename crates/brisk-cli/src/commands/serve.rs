//! Implementation of the `brisk serve` command.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

use brisk_adapters::env::export_env_file;
use brisk_core::domain::ENV_FILE;

use crate::{
    app::{Application, routes},
    cli::ServeArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 4000;

/// Bootstrap `--root`, attach the demo routes and serve until Ctrl-C.
#[instrument(skip_all, fields(root = %args.root.display()))]
pub fn execute(args: ServeArgs, output: &OutputManager) -> CliResult<()> {
    if args.export_env {
        let env_file = args.root.join(ENV_FILE);
        if env_file.is_file() {
            export_env_file(&env_file)?;
        }
    }

    let framework = brisk_adapters::initialize(&args.root, routes::attach)?;
    let port = resolve_port(args.port, framework.config().port())?;
    let app = Application::new(framework);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    app.loggers()
        .info
        .log(format_args!("Starting {} on port {port}", app.config().app_name()));
    output.success(&format!("Serving on http://localhost:{port} (Ctrl-C to stop)"))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "failed to start the async runtime")?;

    runtime.block_on(serve(app.into_router(), addr))?;
    output.info("Server stopped")?;
    Ok(())
}

/// `--port` wins; otherwise `PORT` from config, defaulting to 4000 when empty.
pub fn resolve_port(flag: Option<u16>, configured: &str) -> CliResult<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    let configured = configured.trim();
    if configured.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    configured.parse().map_err(|e| CliError::InvalidInput {
        message: format!("PORT must be a port number, got '{configured}'"),
        source: Some(Box::new(e)),
    })
}

async fn serve(router: Router, addr: SocketAddr) -> CliResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| CliError::Server {
            message: format!("failed to bind {addr}"),
            source,
        })?;
    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| CliError::Server {
            message: "server stopped unexpectedly".into(),
            source,
        })
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_config() {
        assert_eq!(resolve_port(Some(8080), "9000").unwrap(), 8080);
    }

    #[test]
    fn configured_port_is_used() {
        assert_eq!(resolve_port(None, " 9000 ").unwrap(), 9000);
    }

    #[test]
    fn empty_port_defaults() {
        assert_eq!(resolve_port(None, "").unwrap(), DEFAULT_PORT);
    }

    #[test]
    fn invalid_port_is_user_error() {
        let err = resolve_port(None, "http").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        let err = resolve_port(None, "70000").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }
}
