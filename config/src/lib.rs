//! Configuration loading and shared configuration types for the syncer.
//!
//! Configuration is loaded hierarchically from a `configuration/` directory
//! (base file plus an environment-specific file selected by `APP_ENVIRONMENT`)
//! with `APP_`-prefixed environment variable overrides on top.

mod environment;
mod load;
mod secret;
pub mod shared;

pub use environment::Environment;
pub use load::{load_config, Config, LoadConfigError};
pub use secret::SerializableSecretString;
