//! Core domain layer for Brisk.
//!
//! Pure types and rules with no I/O: the frozen application configuration,
//! the renderer selection, the per-request template payloads, the project
//! layout, and the two logging sinks. All filesystem, environment, and
//! template-engine access happens behind the ports in
//! [`crate::application::ports`].
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network, or process-environment access
//! - **Immutable values**: configuration is frozen once built

pub mod config;
pub mod engine;
pub mod layout;
pub mod logging;
pub mod payload;

pub use config::{ApplicationConfig, Settings, parse_bool};
pub use engine::RenderEngine;
pub use layout::{DirectorySet, ENV_FILE, VIEWS_DIR};
pub use logging::{ERROR_TARGET, ErrorLog, INFO_TARGET, InfoLog, Loggers};
pub use payload::{RenderVariables, TemplateData};
