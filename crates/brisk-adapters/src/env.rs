//! Env-file parsing and environment lookup backed by `dotenvy`.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use brisk_core::application::ports::EnvSource;
use brisk_core::error::ConfigError;
use tracing::{debug, instrument};

/// Reads `.env` files with `dotenvy` and looks keys up in an external
/// environment.
///
/// [`DotenvSource::process`] consults the process environment;
/// [`DotenvSource::isolated`] consults a fixed map instead, which keeps tests
/// independent of the ambient environment.
#[derive(Debug, Clone, Default)]
pub struct DotenvSource {
    overrides: Option<HashMap<String, String>>,
}

impl DotenvSource {
    pub fn process() -> Self {
        Self { overrides: None }
    }

    pub fn isolated<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl EnvSource for DotenvSource {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn read_file(&self, path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| ConfigError::new(path, e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::new(path, e.to_string()))?;

        debug!(count = entries.len(), "Env file parsed");
        Ok(entries)
    }

    fn var(&self, key: &str) -> Option<String> {
        match &self.overrides {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        }
    }
}

/// Load `path` into the process environment without overriding variables
/// that are already set.
///
/// Only the CLI calls this, once, before any threads are spawned.
pub fn export_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|e| ConfigError::new(path, e.to_string()))
}
