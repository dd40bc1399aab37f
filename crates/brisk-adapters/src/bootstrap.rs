//! Production wiring of the bootstrapper.

use std::path::Path;

use brisk_core::application::Bootstrapper;
use brisk_core::application::services::Framework;
use brisk_core::domain::ApplicationConfig;
use brisk_core::error::BootstrapError;

use crate::{DotenvSource, LocalFilesystem, StdoutLoggerFactory, TeraRendererFactory};

/// Bootstrapper over the local filesystem, the process environment, stdout
/// sinks and the tera renderers.
pub fn bootstrapper() -> Bootstrapper {
    bootstrapper_with_env(DotenvSource::process())
}

/// Same as [`bootstrapper`] with an explicit environment source.
pub fn bootstrapper_with_env(env: DotenvSource) -> Bootstrapper {
    Bootstrapper::new(
        Box::new(LocalFilesystem::new()),
        Box::new(env),
        Box::new(StdoutLoggerFactory::new()),
        Box::new(TeraRendererFactory::new()),
    )
}

/// Bootstrap the project at `root` with the production adapters.
pub fn initialize<R, F>(root: impl AsRef<Path>, attach_routes: F) -> Result<Framework<R>, BootstrapError>
where
    F: FnOnce(&ApplicationConfig) -> R,
{
    bootstrapper().initialize(root, attach_routes)
}
