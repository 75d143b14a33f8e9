//! Cakeshop configuration bootstrap
//!
//! Resolves the per-environment configuration directory, seeds and
//! reconciles `application.properties` from packaged defaults, and loads the
//! account unlock map used to unlock node accounts.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use config::{account_unlock_map, load_config};
pub use error::{BootstrapError, ConfigError, RemoteCopyError};
