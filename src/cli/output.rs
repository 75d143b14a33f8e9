//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::config::paths::ENV_PROFILE_PROPERTY;
use crate::error::{BootstrapError, ConfigError};

/// Map bootstrap errors to a string for CLI output.
pub fn map_error(e: &BootstrapError) -> String {
    match e {
        BootstrapError::Config(ConfigError::EnvironmentUnset(_)) => format!(
            "{}\nhint: pass --profile <env> or -D {}=<env>",
            e, ENV_PROFILE_PROPERTY
        ),
        _ => e.to_string(),
    }
}
