//! Environment name and configuration directory resolution
//!
//! Search order for the configuration directory:
//! 1. `ETH_CONFIG` environment variable
//! 2. `eth.config.dir` process setting
//! 3. `<containerRoot>/data/cakeshop/<env>`, where the container root is four
//!    levels above the installation root
//!
//! Overrides are expanded with the environment name as the last segment.
//! Only the computed branch migrates the legacy `data/enterprise-ethereum`
//! directory.

use crate::config::sources::SettingsSource;
use crate::error::ConfigError;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Process setting holding the active environment (profile) name
pub const ENV_PROFILE_PROPERTY: &str = "spring.profiles.active";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV_VAR: &str = "ETH_CONFIG";

/// Process setting overriding the configuration directory
pub const CONFIG_DIR_PROPERTY: &str = "eth.config.dir";

pub const DATA_DIR: &str = "data";
pub const PRODUCT_DIR: &str = "cakeshop";
pub const LEGACY_PRODUCT_DIR: &str = "enterprise-ethereum";

/// Packaged base defaults resource
pub fn vendor_config_file() -> &'static str {
    "config/application.properties"
}

/// Packaged environment defaults resource
pub fn vendor_env_config_file(env: &str) -> String {
    format!("config/application-{}.properties", env)
}

/// Result of a legacy directory check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// Legacy directory renamed to the current name
    Migrated { from: PathBuf, to: PathBuf },
    /// Nothing to migrate (no legacy dir, or the new one already exists)
    Skipped,
    /// Rename attempted and failed; the error was logged
    Failed { from: PathBuf, to: PathBuf, reason: String },
}

/// Resolves the environment name and configuration directory.
pub struct PathResolver<'a> {
    settings: &'a dyn SettingsSource,
}

impl<'a> PathResolver<'a> {
    pub fn new(settings: &'a dyn SettingsSource) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &'a dyn SettingsSource {
        self.settings
    }

    /// Active environment name. Blank counts as unset.
    pub fn environment(&self) -> Result<String, ConfigError> {
        non_blank(self.settings.property(ENV_PROFILE_PROPERTY))
            .map(|env| env.trim().to_string())
            .ok_or(ConfigError::EnvironmentUnset(ENV_PROFILE_PROPERTY))
    }

    /// Absolute configuration directory. Recomputed on every call; may
    /// rename the legacy directory in the computed case.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        let env = self.environment()?;

        if let Some(configured) = self.override_dir() {
            let base = self.absolute(Path::new(&configured))?;
            return Ok(expand_path(&base, &[env.as_str()]));
        }

        let container_root = self.container_root()?;
        migrate_legacy_dir(&container_root);
        Ok(expand_path(&container_root, &[DATA_DIR, PRODUCT_DIR, env.as_str()]))
    }

    /// Path of the merged properties file inside the configuration directory
    pub fn config_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.config_dir()?.join(crate::config::CONFIG_FILE))
    }

    /// Container root: two levels above the webapp root, which is two levels
    /// above the installation root.
    pub fn container_root(&self) -> Result<PathBuf, ConfigError> {
        let install_root = self.settings.install_root().map_err(|e| {
            ConfigError::InvalidPath(format!("Unable to determine installation root: {}", e))
        })?;
        let install_root = self.absolute(&install_root)?;
        let webapp_root = expand_path(&install_root, &["..", ".."]);
        Ok(expand_path(&webapp_root, &["..", ".."]))
    }

    fn override_dir(&self) -> Option<String> {
        if let Some(dir) = non_blank(self.settings.env_var(CONFIG_DIR_ENV_VAR)) {
            debug!(source = CONFIG_DIR_ENV_VAR, config_dir = %dir, "Config dir override");
            return Some(dir);
        }
        let dir = non_blank(self.settings.property(CONFIG_DIR_PROPERTY))?;
        debug!(source = CONFIG_DIR_PROPERTY, config_dir = %dir, "Config dir override");
        Some(dir)
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf, ConfigError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = self.settings.working_dir().map_err(|e| {
            ConfigError::InvalidPath(format!(
                "Cannot anchor relative path {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(cwd.join(path))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Rename `data/enterprise-ethereum` to `data/cakeshop` under `container_root`
/// when the former exists and the latter does not. Failures are logged only.
pub fn migrate_legacy_dir(container_root: &Path) -> Migration {
    let data_dir = container_root.join(DATA_DIR);
    let old_path = data_dir.join(LEGACY_PRODUCT_DIR);
    let new_path = data_dir.join(PRODUCT_DIR);

    if !old_path.exists() || new_path.exists() {
        return Migration::Skipped;
    }

    match std::fs::rename(&old_path, &new_path) {
        Ok(()) => {
            info!(
                from = %old_path.display(),
                to = %new_path.display(),
                "Migrated legacy config directory"
            );
            Migration::Migrated {
                from: old_path,
                to: new_path,
            }
        }
        Err(e) => {
            warn!(
                from = %old_path.display(),
                to = %new_path.display(),
                error = %e,
                "Failed to migrate legacy config directory"
            );
            Migration::Failed {
                from: old_path,
                to: new_path,
                reason: e.to_string(),
            }
        }
    }
}

/// Join `segments` onto `base` and resolve `.` and `..` lexically.
///
/// No filesystem access: symlinks are not followed and nothing needs to exist.
pub fn expand_path(base: &Path, segments: &[&str]) -> PathBuf {
    let joined = segments
        .iter()
        .fold(base.to_path_buf(), |path, segment| path.join(segment));
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
