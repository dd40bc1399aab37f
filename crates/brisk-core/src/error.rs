//! Unified error handling for Brisk Core.
//!
//! Each bootstrap step fails with its own error type; [`BootstrapError`]
//! tags that error with the step that produced it and otherwise leaves it
//! untouched.

use std::fmt;

use thiserror::Error;

pub use crate::application::error::{ConfigError, FilesystemError, RenderError};

/// The ordered steps of bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapStep {
    ProvisionDirectories,
    ProvisionEnvFile,
    LoadConfig,
    BuildLoggers,
    FreezeConfig,
    AttachRouter,
    BuildRenderer,
}

impl BootstrapStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProvisionDirectories => "provision directories",
            Self::ProvisionEnvFile => "provision env file",
            Self::LoadConfig => "load configuration",
            Self::BuildLoggers => "build loggers",
            Self::FreezeConfig => "freeze configuration",
            Self::AttachRouter => "attach router",
            Self::BuildRenderer => "build renderer",
        }
    }
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by the failing step.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Bootstrap aborted at `step`.
#[derive(Debug, Error)]
#[error("bootstrap failed at step '{step}': {source}")]
pub struct BootstrapError {
    pub step: BootstrapStep,
    #[source]
    pub source: StepError,
}

impl BootstrapError {
    pub fn new(step: BootstrapStep, source: impl Into<StepError>) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match &self.source {
            StepError::Filesystem(e) => e.suggestions(),
            StepError::Config(e) => e.suggestions(),
            StepError::Render(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match &self.source {
            StepError::Filesystem(_) => ErrorCategory::Internal,
            StepError::Config(_) => ErrorCategory::Configuration,
            StepError::Render(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}
