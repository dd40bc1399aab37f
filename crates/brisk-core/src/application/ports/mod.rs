//! Application ports (traits) for external dependencies.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the bootstrapper, implemented in
//!   `brisk-adapters`
//!   - `Filesystem`: directory and file provisioning
//!   - `EnvSource`: env-file parsing and external environment lookup
//!   - `LoggerFactory`: log sink installation
//!   - `RendererFactory`: renderer construction
//!
//! - **Driving Ports**: called by application handlers
//!   - `PageRenderer`: page rendering

pub mod output;

pub use output::{EnvSource, Filesystem, LoggerFactory, PageRenderer, RendererFactory};
