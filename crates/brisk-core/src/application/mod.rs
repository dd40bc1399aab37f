//! Application layer for Brisk.
//!
//! This layer contains:
//! - **Services**: the bootstrap pipeline (Bootstrapper, DirectoryProvisioner,
//!   ConfigLoader)
//! - **Ports**: interface definitions (traits) for filesystem, environment,
//!   logging and rendering
//! - **Errors**: step-level error types
//!
//! Pure rules (boolean parsing, engine selection, payload narrowing) live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{Bootstrapper, ConfigLoader, DirectoryProvisioner, Framework};

pub use ports::{EnvSource, Filesystem, LoggerFactory, PageRenderer, RendererFactory};
