//! Config Loader - env file plus external environment.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::EnvSource,
    domain::{ENV_FILE, Settings},
    error::ConfigError,
};

/// Reads `<root>/.env` and resolves it against the external environment.
pub struct ConfigLoader<'a> {
    env: &'a dyn EnvSource,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(env: &'a dyn EnvSource) -> Self {
        Self { env }
    }

    /// Load settings for the project at `root`.
    ///
    /// An empty env file is valid. Only an unreadable or unparseable file is
    /// an error; malformed individual values (e.g. `DEBUG=maybe`) are not.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn load(&self, root: &Path) -> Result<Settings, ConfigError> {
        let path = root.join(ENV_FILE);
        let entries = self.env.read_file(&path)?;
        debug!(entries = entries.len(), "Env file read");

        Ok(Settings::merge(entries, |key| self.env.var(key)))
    }
}
