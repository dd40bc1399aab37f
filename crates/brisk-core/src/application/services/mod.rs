//! Application services - the bootstrap pipeline.
//!
//! Services coordinate the domain layer and the ports to turn a bare
//! directory into an initialized application.

pub mod bootstrapper;
pub mod config_loader;
pub mod provisioner;

pub use bootstrapper::{Bootstrapper, Framework};
pub use config_loader::ConfigLoader;
pub use provisioner::DirectoryProvisioner;
