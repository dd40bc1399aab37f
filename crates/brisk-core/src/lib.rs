//! Brisk Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Brisk
//! application framework: the bootstrap pipeline that prepares a project
//! root, and the rendering contract handlers call to produce pages.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │      brisk-cli (CLI + HTTP handlers)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (Bootstrapper, DirectoryProvisioner,   │
//! │             ConfigLoader)               │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  (Filesystem, EnvSource, LoggerFactory, │
//! │     PageRenderer, RendererFactory)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     brisk-adapters (Infrastructure)     │
//! │ (LocalFilesystem, DotenvSource, Tera)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brisk_core::application::Bootstrapper;
//!
//! // Adapters come from `brisk-adapters`.
//! let bootstrapper = Bootstrapper::new(filesystem, env, loggers, renderers);
//! let framework = bootstrapper.initialize("./myapp", |_config| ()).unwrap();
//! println!("{}", framework.config().app_name());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Bootstrapper, ConfigLoader, DirectoryProvisioner, Framework,
        ports::{EnvSource, Filesystem, LoggerFactory, PageRenderer, RendererFactory},
    };
    pub use crate::domain::{
        ApplicationConfig, DirectorySet, Loggers, RenderEngine, RenderVariables, Settings,
        TemplateData,
    };
    pub use crate::error::{BootstrapError, BootstrapStep, ConfigError, FilesystemError, RenderError};
}

/// Framework version recorded in every [`domain::ApplicationConfig`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
