//! Implementation of the `brisk render` command.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::Value;
use tracing::{instrument, warn};

use crate::{
    cli::RenderArgs,
    error::{CliError, CliResult, IntoCli},
};

/// Bootstrap `--root`, then render `PAGE` to stdout or `--output`.
#[instrument(skip_all, fields(page = %args.page, root = %args.root.display()))]
pub fn execute(args: RenderArgs) -> CliResult<()> {
    let variables = args.vars.as_deref().map(read_payload).transpose()?;
    let data = args.data.as_deref().map(read_payload).transpose()?;

    let framework = brisk_adapters::initialize(&args.root, |_| ())?;
    let renderer = framework.renderer();
    if !renderer.engine().is_enabled() {
        warn!(
            renderer = framework.config().renderer_name(),
            "No template engine configured; output will be empty"
        );
    }

    match &args.output {
        Some(path) => {
            // Render first so a failure leaves no partial file behind.
            let mut body = Vec::new();
            renderer.page(&mut body, &args.page, variables.as_ref(), data.as_ref())?;
            fs::write(path, body)
                .with_cli_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            renderer.page(&mut lock, &args.page, variables.as_ref(), data.as_ref())?;
            lock.flush().with_cli_context(|| "failed to flush stdout")?;
        }
    }

    Ok(())
}

/// Read a JSON payload file.
pub fn read_payload(path: &Path) -> CliResult<Value> {
    let raw = fs::read_to_string(path)
        .with_cli_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).map_err(|source| CliError::InvalidPayload {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_json_payload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.json");
        fs::write(&path, r#"{"title": "Home"}"#).unwrap();

        let value = read_payload(&path).unwrap();
        assert_eq!(value["title"], "Home");
    }

    #[test]
    fn malformed_payload_is_user_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vars.json");
        fs::write(&path, "{title: Home}").unwrap();

        let err = read_payload(&path).unwrap_err();
        assert!(matches!(err, CliError::InvalidPayload { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_payload_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = read_payload(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CliError::IoError { .. }));
    }
}
