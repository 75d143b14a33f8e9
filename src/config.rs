//! Configuration Bootstrap
//!
//! Locates the per-environment configuration directory, seeds it from
//! packaged defaults on first run, reconciles the merged
//! `application.properties` on every later run and loads the account
//! unlock map stored next to it.
//!
//! Layer precedence, lowest first:
//! 1. Packaged base defaults (`config/application.properties`)
//! 2. Packaged env defaults (`config/application-<env>.properties`)
//! 3. Existing `<configDir>/application.properties`
//! 4. Local overrides (`config.path`)

pub mod accounts;
pub mod bootstrap;
pub mod merge;
pub mod paths;
pub mod properties;
pub mod sources;

use crate::error::BootstrapError;
use std::collections::BTreeMap;

pub use accounts::AccountStore;
pub use bootstrap::{
    BootstrapOutcome, BootstrapState, ConfigBootstrapper, RemoteSeed, ResolvedConfig,
    CONFIG_PATH_KEY, REMOTE_ENV,
};
pub use merge::{persist, PropertyMerger};
pub use paths::{expand_path, PathResolver};
pub use properties::Properties;
pub use sources::{
    DefaultsSource, DirectoryDefaults, EmbeddedDefaults, ProcessSettings, SettingsSource,
    StaticSettings,
};

/// Merged configuration file inside the configuration directory
pub const CONFIG_FILE: &str = "application.properties";

/// Account unlock map inside the configuration directory
pub const ACCOUNT_FILE: &str = "accounts.json";

/// Run the full bootstrap against `settings` and `defaults`.
pub fn load_config(
    settings: &dyn SettingsSource,
    defaults: &dyn DefaultsSource,
) -> Result<BootstrapOutcome, BootstrapError> {
    ConfigBootstrapper::new(settings, defaults).bootstrap()
}

/// Account unlock map from the resolved configuration directory.
pub fn account_unlock_map(
    settings: &dyn SettingsSource,
) -> Result<BTreeMap<String, String>, BootstrapError> {
    AccountStore::new().load_resolved(&PathResolver::new(settings))
}
