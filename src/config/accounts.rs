//! Account unlock map: `<configDir>/accounts.json`, a JSON object of
//! account address to unlock secret. Read-only from this crate's side.

use crate::config::paths::PathResolver;
use crate::config::ACCOUNT_FILE;
use crate::error::BootstrapError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Loads the account unlock map from a configuration directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountStore;

impl AccountStore {
    pub fn new() -> Self {
        Self
    }

    pub fn account_file(config_dir: &Path) -> PathBuf {
        config_dir.join(ACCOUNT_FILE)
    }

    /// Parse `accounts.json` inside `config_dir`.
    pub fn load(&self, config_dir: &Path) -> Result<BTreeMap<String, String>, BootstrapError> {
        let path = Self::account_file(config_dir);
        let content = std::fs::read_to_string(&path).map_err(|e| BootstrapError::MalformedData {
            path: path.clone(),
            reason: format!("unable to read account file: {}", e),
        })?;

        serde_json::from_str::<BTreeMap<String, String>>(&content).map_err(|e| {
            BootstrapError::MalformedData {
                path,
                reason: e.to_string(),
            }
        })
    }

    /// Resolve the configuration directory, then load its account map.
    pub fn load_resolved(
        &self,
        resolver: &PathResolver<'_>,
    ) -> Result<BTreeMap<String, String>, BootstrapError> {
        let config_dir = resolver.config_dir()?;
        self.load(&config_dir)
    }
}
