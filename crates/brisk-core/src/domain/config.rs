//! Application configuration.
//!
//! [`Settings`] is the merged view of the project's `.env` file and the
//! external environment. [`ApplicationConfig`] is derived from it once, at
//! the end of bootstrap, and never changes afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::engine::RenderEngine;
use crate::domain::layout::VIEWS_DIR;

/// Environment key holding the debug flag.
pub const DEBUG_KEY: &str = "DEBUG";
/// Environment key holding the listen port.
pub const PORT_KEY: &str = "PORT";
/// Environment key holding the renderer name.
pub const RENDERER_KEY: &str = "RENDERER";

const RECOGNIZED_KEYS: [&str; 3] = [DEBUG_KEY, PORT_KEY, RENDERER_KEY];

/// Resolved key/value configuration.
///
/// Built with load-if-absent semantics: a key already present in the external
/// environment keeps its external value; the env file only fills gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Merge env-file entries with an external lookup.
    ///
    /// Recognized keys are resolved even when the file does not mention them,
    /// so `PORT=8080 brisk serve` works against an empty `.env`.
    pub fn merge<F>(file_entries: impl IntoIterator<Item = (String, String)>, external: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = BTreeMap::new();

        // A key repeated in the file takes its last value.
        for (key, value) in file_entries {
            let resolved = external(&key).unwrap_or(value);
            values.insert(key, resolved);
        }

        for key in RECOGNIZED_KEYS {
            if !values.contains_key(key) {
                if let Some(value) = external(key) {
                    values.insert(key.to_owned(), value);
                }
            }
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `DEBUG` as a boolean. Absent or malformed values are `false`.
    pub fn debug(&self) -> bool {
        self.get(DEBUG_KEY).and_then(parse_bool).unwrap_or(false)
    }

    /// Raw `PORT`, or the empty string.
    pub fn port(&self) -> &str {
        self.get(PORT_KEY).unwrap_or_default()
    }

    /// Raw `RENDERER`, or the empty string.
    pub fn renderer(&self) -> &str {
        self.get(RENDERER_KEY).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything
/// else is `None`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Frozen configuration of a bootstrapped application.
///
/// Every field is populated at freeze time and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationConfig {
    app_name: String,
    debug: bool,
    version: String,
    root_path: PathBuf,
    renderer: RenderEngine,
    renderer_name: String,
    port: String,
}

impl ApplicationConfig {
    /// Snapshot `settings` for the application rooted at `root_path`.
    pub fn freeze(app_name: String, root_path: PathBuf, settings: &Settings) -> Self {
        let renderer_name = settings.renderer().to_owned();
        Self {
            app_name,
            debug: settings.debug(),
            version: crate::VERSION.to_owned(),
            root_path,
            renderer: RenderEngine::from_name(&renderer_name),
            renderer_name,
            port: settings.port().to_owned(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Framework version the application was bootstrapped with.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn renderer(&self) -> RenderEngine {
        self.renderer
    }

    /// Renderer name exactly as configured.
    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// `<root>/views`.
    pub fn views_dir(&self) -> PathBuf {
        self.root_path.join(VIEWS_DIR)
    }
}
