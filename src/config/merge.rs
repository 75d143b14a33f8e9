//! Property merging: packaged defaults, existing user file, deterministic persist.

pub mod merge_policy;

use crate::config::paths::{vendor_config_file, vendor_env_config_file};
use crate::config::properties::Properties;
use crate::config::sources::DefaultsSource;
use crate::error::BootstrapError;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads packaged defaults and merges them with the on-disk file.
pub struct PropertyMerger<'a> {
    defaults: &'a dyn DefaultsSource,
}

impl<'a> PropertyMerger<'a> {
    pub fn new(defaults: &'a dyn DefaultsSource) -> Self {
        Self { defaults }
    }

    /// Base defaults overlaid with `env` defaults (env wins).
    pub fn load_packaged_defaults(&self, env: &str) -> Result<Properties, BootstrapError> {
        let base = self.load_resource(vendor_config_file())?;
        let env_defaults = self.load_resource(&vendor_env_config_file(env))?;
        Ok(merge_policy::seed(base, env_defaults))
    }

    /// Packaged `env` defaults overlaid with the existing file (file wins).
    pub fn merge_onto_existing(
        &self,
        existing_file: &Path,
        env: &str,
    ) -> Result<Properties, BootstrapError> {
        let env_defaults = self.load_resource(&vendor_env_config_file(env))?;
        let existing = Properties::load_file(existing_file)?;
        let added = env_defaults
            .keys()
            .filter(|key| !existing.contains_key(key))
            .count();
        debug!(
            config_file = %existing_file.display(),
            added_keys = added,
            "Merged packaged env defaults under existing config"
        );
        Ok(merge_policy::reconcile(env_defaults, existing))
    }

    /// Human-readable location of the packaged `env` defaults
    pub fn describe_env_defaults(&self, env: &str) -> String {
        self.defaults.describe(&vendor_env_config_file(env))
    }

    fn load_resource(&self, name: &str) -> Result<Properties, BootstrapError> {
        let text = self
            .defaults
            .read(name)?
            .ok_or_else(|| BootstrapError::ResourceMissing(self.defaults.describe(name)))?;
        Properties::parse(&text).map_err(|e| BootstrapError::Decode {
            path: self.defaults.describe(name).into(),
            line: e.line,
            message: e.message,
        })
    }
}

/// Write `props` to `destination` sorted by key.
///
/// Writes a sibling temporary file and renames it over the destination so an
/// interrupted write leaves the previous file intact.
pub fn persist(props: &Properties, destination: &Path) -> Result<(), BootstrapError> {
    let temp_path = destination.with_extension("properties.tmp");
    fs::write(&temp_path, props.to_text()).map_err(|e| BootstrapError::io(&temp_path, e))?;

    fs::rename(&temp_path, destination).map_err(|e| {
        // Clean up temp file on error
        let _ = fs::remove_file(&temp_path);
        BootstrapError::io(destination, e)
    })?;

    debug!(
        config_file = %destination.display(),
        keys = props.len(),
        "Persisted properties"
    );
    Ok(())
}
