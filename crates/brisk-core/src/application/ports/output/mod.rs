//! Ports implemented by infrastructure.
//!
//! The `brisk-adapters` crate provides the production implementations.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ApplicationConfig, Loggers, RenderEngine};
use crate::error::{ConfigError, RenderError};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `brisk_adapters::filesystem::LocalFilesystem` (production)
/// - `brisk_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all missing parents with unix `mode`.
    fn create_dir_all(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Create a new empty file with unix `mode`.
    ///
    /// Fails with [`io::ErrorKind::AlreadyExists`] if anything exists at
    /// `path`; existing content is never truncated.
    fn create_file(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for configuration input.
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource: Send + Sync {
    /// Parse a `KEY=VALUE` file into its entries, in file order.
    fn read_file(&self, path: &Path) -> Result<Vec<(String, String)>, ConfigError>;

    /// Look up a key in the external environment.
    fn var(&self, key: &str) -> Option<String>;
}

/// Port for log sink installation. Cannot fail.
#[cfg_attr(test, mockall::automock)]
pub trait LoggerFactory: Send + Sync {
    fn build(&self) -> Loggers;
}

/// Port for page rendering.
///
/// Implementations are shared by concurrent request handlers and must not
/// mutate state per call.
pub trait PageRenderer: Send + Sync {
    /// Engine this renderer dispatches to.
    fn engine(&self) -> RenderEngine;

    /// Render `page` into `output`.
    ///
    /// `variables` and `data` are loosely-typed payloads narrowed by the
    /// active engine; a payload of the wrong shape is an error, never a
    /// panic. Nothing is written to `output` unless rendering succeeds.
    fn page(
        &self,
        output: &mut dyn Write,
        page: &str,
        variables: Option<&Value>,
        data: Option<&Value>,
    ) -> Result<(), RenderError>;
}

/// Port for renderer construction, run once at the end of bootstrap.
#[cfg_attr(test, mockall::automock)]
pub trait RendererFactory: Send + Sync {
    fn build(
        &self,
        config: &ApplicationConfig,
        loggers: &Loggers,
    ) -> Result<Arc<dyn PageRenderer>, RenderError>;
}
