//! Bootstrapper - the one-time startup sequence.
//!
//! Runs, strictly in order:
//! 1. Provision the project directories
//! 2. Provision the env file
//! 3. Load configuration
//! 4. Build the log sinks
//! 5. Freeze the [`ApplicationConfig`]
//! 6. Attach the router (opaque to this crate)
//! 7. Build the page renderer
//!
//! The first failing step aborts the rest; its error is returned tagged with
//! the step.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{EnvSource, Filesystem, LoggerFactory, PageRenderer, RendererFactory},
        services::{ConfigLoader, DirectoryProvisioner},
    },
    domain::{ApplicationConfig, DirectorySet, Loggers},
    error::{BootstrapError, BootstrapStep},
};

const FALLBACK_APP_NAME: &str = "app";

/// An initialized application core.
///
/// `R` is whatever router the caller attached; this crate never looks inside
/// it.
pub struct Framework<R> {
    config: ApplicationConfig,
    loggers: Loggers,
    routes: R,
    renderer: Arc<dyn PageRenderer>,
}

impl<R> Framework<R> {
    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    pub fn loggers(&self) -> &Loggers {
        &self.loggers
    }

    pub fn routes(&self) -> &R {
        &self.routes
    }

    /// Shared handle to the renderer, for request handlers.
    pub fn renderer(&self) -> Arc<dyn PageRenderer> {
        Arc::clone(&self.renderer)
    }

    /// Take the router out, dropping the rest.
    pub fn into_routes(self) -> R {
        self.routes
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for Framework<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framework")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("engine", &self.renderer.engine())
            .finish_non_exhaustive()
    }
}

/// Orchestrates bootstrap over injected adapters.
pub struct Bootstrapper {
    filesystem: Box<dyn Filesystem>,
    env: Box<dyn EnvSource>,
    loggers: Box<dyn LoggerFactory>,
    renderers: Box<dyn RendererFactory>,
    directories: DirectorySet,
    app_name: Option<String>,
}

impl Bootstrapper {
    /// Create a new bootstrapper with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use brisk_core::application::Bootstrapper;
    ///
    /// let bootstrapper = Bootstrapper::new(
    ///     filesystem, // impl Filesystem
    ///     env,        // impl EnvSource
    ///     loggers,    // impl LoggerFactory
    ///     renderers,  // impl RendererFactory
    /// );
    /// ```
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        env: Box<dyn EnvSource>,
        loggers: Box<dyn LoggerFactory>,
        renderers: Box<dyn RendererFactory>,
    ) -> Self {
        Self {
            filesystem,
            env,
            loggers,
            renderers,
            directories: DirectorySet::standard(),
            app_name: None,
        }
    }

    /// Override the application name (defaults to the root directory name).
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Override the provisioned directory set.
    pub fn with_directories(mut self, directories: DirectorySet) -> Self {
        self.directories = directories;
        self
    }

    /// Bootstrap the project at `root`.
    ///
    /// `attach_routes` builds the router once configuration is frozen.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn initialize<R, F>(
        &self,
        root: impl AsRef<Path>,
        attach_routes: F,
    ) -> Result<Framework<R>, BootstrapError>
    where
        F: FnOnce(&ApplicationConfig) -> R,
    {
        let root = root.as_ref();
        let provisioner = DirectoryProvisioner::new(self.filesystem.as_ref());

        // 1. Directories
        provisioner
            .provision_directories(root, &self.directories)
            .map_err(|e| BootstrapError::new(BootstrapStep::ProvisionDirectories, e))?;
        debug!(step = %BootstrapStep::ProvisionDirectories, "Step complete");

        // 2. Env file, strictly after the directories
        provisioner
            .provision_env_file(root)
            .map_err(|e| BootstrapError::new(BootstrapStep::ProvisionEnvFile, e))?;
        debug!(step = %BootstrapStep::ProvisionEnvFile, "Step complete");

        // 3. Configuration
        let settings = ConfigLoader::new(self.env.as_ref())
            .load(root)
            .map_err(|e| BootstrapError::new(BootstrapStep::LoadConfig, e))?;
        debug!(step = %BootstrapStep::LoadConfig, keys = settings.len(), "Step complete");

        // 4. Log sinks
        let loggers = self.loggers.build();
        debug!(step = %BootstrapStep::BuildLoggers, "Step complete");

        // 5. Freeze
        let config = ApplicationConfig::freeze(self.app_name_for(root), root.to_path_buf(), &settings);
        debug!(step = %BootstrapStep::FreezeConfig, engine = %config.renderer(), "Step complete");

        // 6. Router
        let routes = attach_routes(&config);
        debug!(step = %BootstrapStep::AttachRouter, "Step complete");

        // 7. Renderer
        let renderer = self
            .renderers
            .build(&config, &loggers)
            .map_err(|e| BootstrapError::new(BootstrapStep::BuildRenderer, e))?;
        debug!(step = %BootstrapStep::BuildRenderer, "Step complete");

        info!(
            app = config.app_name(),
            version = config.version(),
            renderer = %config.renderer(),
            debug = config.debug(),
            "Bootstrap completed"
        );
        loggers.info.log(format_args!(
            "{} initialized (brisk {}, renderer {})",
            config.app_name(),
            config.version(),
            config.renderer()
        ));

        Ok(Framework {
            config,
            loggers,
            routes,
            renderer,
        })
    }

    fn app_name_for(&self, root: &Path) -> String {
        if let Some(name) = &self.app_name {
            return name.clone();
        }
        root.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_APP_NAME.to_owned())
    }
}
