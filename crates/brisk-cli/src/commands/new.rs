//! Implementation of the `brisk new` command.
//!
//! Responsibility: prepare the target directory, run the bootstrap and report
//! the resulting layout. No business logic lives here.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use brisk_core::domain::{DirectorySet, ENV_FILE};

use crate::{
    cli::{EngineChoice, NewArgs},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `brisk new` command.
///
/// 1. Reject a path occupied by a regular file
/// 2. Seed `.env` with `RENDERER` when requested and the file is new
/// 3. Bootstrap the project
/// 4. Print the layout
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: NewArgs, output: &OutputManager) -> CliResult<()> {
    let root = args.path.as_path();
    if root.exists() && !root.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("{} exists and is not a directory", root.display()),
            source: None,
        });
    }

    if let Some(engine) = args.renderer {
        if !seed_env_file(root, engine)? {
            output.warning(&format!(
                "{} already exists; RENDERER left unchanged",
                root.join(ENV_FILE).display()
            ))?;
        }
    }

    output.header(&format!("Bootstrapping {}...", root.display()))?;
    let framework = brisk_adapters::initialize(root, |_| ())?;
    let config = framework.config();

    info!(app = config.app_name(), renderer = %config.renderer(), "Project bootstrapped");

    output.success(&format!("Project '{}' is ready", config.app_name()))?;
    if !output.is_quiet() {
        output.print("")?;
        for name in DirectorySet::standard().names() {
            output.print(&format!("  {name}/"))?;
        }
        output.print(&format!("  {ENV_FILE}"))?;
        output.print("")?;
        output.info(&format!("Renderer: {}", config.renderer()))?;
        if !config.renderer().is_enabled() {
            output.print("  Set RENDERER=go or RENDERER=jet in .env to render pages")?;
        }
    }

    Ok(())
}

/// Write `RENDERER=<engine>` to a new `.env`. Returns `false` when an env
/// file already exists.
fn seed_env_file(root: &Path, engine: EngineChoice) -> CliResult<bool> {
    let env_path = root.join(ENV_FILE);
    if env_path.exists() {
        return Ok(false);
    }

    fs::create_dir_all(root)
        .with_cli_context(|| format!("failed to create {}", root.display()))?;
    fs::write(&env_path, format!("RENDERER={}\n", engine.as_str()))
        .with_cli_context(|| format!("failed to write {}", env_path.display()))?;

    debug!(path = %env_path.display(), renderer = engine.as_str(), "Env file seeded");
    Ok(true)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
