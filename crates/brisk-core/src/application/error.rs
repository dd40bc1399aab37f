//! Errors raised by the individual bootstrap steps and by rendering.
//!
//! Provisioning and configuration errors are fatal to startup. Render errors
//! are per request: they go back to the calling handler, which decides the
//! HTTP response.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ErrorCategory;

/// A directory or file could not be provisioned.
#[derive(Debug, Error)]
#[error("filesystem error at {path}: {source}")]
pub struct FilesystemError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FilesystemError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        let mut suggestions = vec![format!("Failed to provision: {}", self.path.display())];
        match self.source.kind() {
            io::ErrorKind::PermissionDenied => {
                suggestions.push("Check that you have write permissions".into());
            }
            io::ErrorKind::AlreadyExists => suggestions.push(format!(
                "A file is in the way; move or remove {}",
                self.path.display()
            )),
            _ => suggestions.push("Check available disk space".into()),
        }
        suggestions
    }
}

/// The env file could not be read or parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("configuration error in {path}: {reason}")]
pub struct ConfigError {
    pub path: PathBuf,
    pub reason: String,
}

impl ConfigError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        vec![
            format!("Check {} for malformed lines", self.path.display()),
            "Each line should be KEY=VALUE".into(),
        ]
    }
}

/// Rendering a page failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("failed to parse template {name}: {reason}")]
    TemplateParse { name: String, reason: String },

    #[error("failed to execute template {name}: {reason}")]
    TemplateExec { name: String, reason: String },

    /// The variables payload is not a map of named values.
    #[error("render variables must be an object of named values, got {found}")]
    InvalidVariables { found: &'static str },

    /// The data payload does not have the `TemplateData` shape.
    #[error("render data is not valid template data: {reason}")]
    InvalidData { reason: String },
}

impl RenderError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No template named {name}"),
                "Templates live under <root>/views".into(),
            ],
            Self::TemplateParse { name, .. } => {
                vec![format!("Fix the syntax error in {name}")]
            }
            Self::InvalidVariables { .. } => {
                vec!["Pass variables as a JSON object, e.g. {\"title\": \"Home\"}".into()]
            }
            Self::InvalidData { .. } => vec![
                "Pass data as a JSON object with TemplateData fields".into(),
                "Known fields: is_authenticated, int_map, string_map, float_map, data, csrf_token, port, server_name, secure".into(),
            ],
            Self::TemplateExec { .. } => vec!["Check the values the template refers to".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::TemplateParse { .. } => ErrorCategory::Configuration,
            Self::InvalidVariables { .. } | Self::InvalidData { .. } => ErrorCategory::Validation,
            Self::TemplateExec { .. } => ErrorCategory::Internal,
        }
    }
}
