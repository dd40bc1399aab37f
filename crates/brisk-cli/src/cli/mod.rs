//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use brisk_adapters::logging::SinkStream;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "brisk",
    bin_name = "brisk",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Minimal application framework",
    long_about = "Brisk bootstraps a project directory (standard layout, .env \
                  configuration, log sinks) and renders pages with a \
                  pluggable template engine.",
    after_help = "EXAMPLES:\n\
        \x20 brisk new my-site\n\
        \x20 brisk render home --root my-site\n\
        \x20 brisk serve --root my-site --port 4000\n\
        \x20 brisk completions bash > /usr/share/bash-completion/completions/brisk",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Stream for the application log sinks. `render` keeps stdout for the
    /// page body.
    pub fn sink_stream(&self) -> SinkStream {
        match self.command {
            Commands::Render(_) => SinkStream::Stderr,
            _ => SinkStream::Stdout,
        }
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap a project skeleton.
    #[command(
        visible_alias = "n",
        about = "Bootstrap a new project",
        after_help = "EXAMPLES:\n\
            \x20 brisk new my-site\n\
            \x20 brisk new ../sites/blog --renderer jet"
    )]
    New(NewArgs),

    /// Render a page to stdout.
    #[command(
        visible_alias = "r",
        about = "Render a page to stdout",
        long_about = "Render a page to stdout. Application log lines go to stderr \
            so stdout carries only the page body.",
        after_help = "EXAMPLES:\n\
            \x20 brisk render home\n\
            \x20 brisk render testjet --root my-site --vars vars.json\n\
            \x20 brisk render about --data data.json -o about.html"
    )]
    Render(RenderArgs),

    /// Serve the demo application over HTTP.
    #[command(
        about = "Serve the application over HTTP",
        after_help = "EXAMPLES:\n\
            \x20 brisk serve\n\
            \x20 brisk serve --root my-site --port 8080"
    )]
    Serve(ServeArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 brisk completions bash > ~/.local/share/bash-completion/completions/brisk\n\
            \x20 brisk completions zsh  > ~/.zfunc/_brisk\n\
            \x20 brisk completions fish > ~/.config/fish/completions/brisk.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `brisk new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory. Created if missing; an existing project is left
    /// intact.
    #[arg(value_name = "PATH", help = "Project directory")]
    pub path: PathBuf,

    /// Seed `RENDERER` in a freshly created `.env`.
    #[arg(
        long = "renderer",
        value_name = "ENGINE",
        value_enum,
        help = "Template engine to configure in a new .env"
    )]
    pub renderer: Option<EngineChoice>,
}

/// Engines selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// Native templates (`views/<page>.page.tmpl`).
    Go,
    /// Extended templates (`views/<page>.jet`).
    Jet,
}

impl EngineChoice {
    /// Value written to `RENDERER`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "go",
            Self::Jet => "jet",
        }
    }
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `brisk render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page name, without extension.
    #[arg(value_name = "PAGE", help = "Page to render")]
    pub page: String,

    /// Project root.
    #[arg(
        long = "root",
        value_name = "DIR",
        default_value = ".",
        env = "BRISK_ROOT",
        help = "Project root directory"
    )]
    pub root: PathBuf,

    /// JSON file holding the template variables (an object).
    #[arg(long = "vars", value_name = "FILE", help = "Variables JSON file")]
    pub vars: Option<PathBuf>,

    /// JSON file holding the template data.
    #[arg(long = "data", value_name = "FILE", help = "Template data JSON file")]
    pub data: Option<PathBuf>,

    /// Write the page here instead of stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the rendered page to FILE"
    )]
    pub output: Option<PathBuf>,
}

// ── serve ─────────────────────────────────────────────────────────────────────

/// Arguments for `brisk serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Project root.
    #[arg(
        long = "root",
        value_name = "DIR",
        default_value = ".",
        env = "BRISK_ROOT",
        help = "Project root directory"
    )]
    pub root: PathBuf,

    /// Listen port; overrides `PORT` from the environment and `.env`.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    /// Export `.env` entries into the process environment before bootstrap.
    #[arg(long = "export-env", help = "Export .env into the process environment")]
    pub export_env: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `brisk completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["brisk", "new", "my-site", "--renderer", "jet"]);
        match cli.command {
            Commands::New(args) => {
                assert_eq!(args.path, PathBuf::from("my-site"));
                assert_eq!(args.renderer, Some(EngineChoice::Jet));
            }
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn render_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["brisk", "render", "home"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.page, "home");
                assert!(args.vars.is_none());
                assert!(args.data.is_none());
            }
            other => panic!("expected Render command, got {other:?}"),
        }
    }

    #[test]
    fn only_render_moves_sinks_to_stderr() {
        let render = Cli::try_parse_from(["brisk", "render", "home"]).unwrap();
        assert_eq!(render.sink_stream(), SinkStream::Stderr);

        let serve = Cli::try_parse_from(["brisk", "serve"]).unwrap();
        assert_eq!(serve.sink_stream(), SinkStream::Stdout);
    }

    #[test]
    fn serve_port_must_be_numeric() {
        assert!(Cli::try_parse_from(["brisk", "serve", "--port", "http"]).is_err());
        let cli = Cli::try_parse_from(["brisk", "serve", "-p", "8080"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve(ServeArgs { port: Some(8080), .. })));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["brisk", "--quiet", "--verbose", "render", "home"]);
        assert!(result.is_err());
    }

    #[test]
    fn engine_choice_values() {
        assert_eq!(EngineChoice::Go.as_str(), "go");
        assert_eq!(EngineChoice::Jet.as_str(), "jet");
    }
}
