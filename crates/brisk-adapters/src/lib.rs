//! Infrastructure adapters for Brisk.
//!
//! This crate implements the ports defined in `brisk-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod bootstrap;
pub mod env;
pub mod filesystem;
pub mod logging;
pub mod renderer;

// Re-export commonly used adapters
pub use bootstrap::{bootstrapper, bootstrapper_with_env, initialize};
pub use env::DotenvSource;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use logging::StdoutLoggerFactory;
pub use renderer::{TemplateRenderer, TeraRendererFactory};
