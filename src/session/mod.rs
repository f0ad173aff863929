//! Session context and configuration

pub mod config;
pub mod context;

pub use config::{ConfigError, SessionConfig, SessionConfigBuilder};
pub use context::IshSession;
