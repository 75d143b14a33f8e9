//! Config directory bootstrap
//!
//! Each run either seeds a missing directory/file from packaged defaults or
//! reconciles the existing file with the current packaged env defaults, then
//! rewrites the file sorted. In the `remote` environment the account seed
//! file is copied into the directory afterwards.
//!
//! Safe to re-run: an unchanged file is rewritten byte-identical and user
//! keys are never dropped.

use crate::config::accounts::AccountStore;
use crate::config::merge::{persist, PropertyMerger};
use crate::config::paths::{expand_path, PathResolver};
use crate::config::properties::Properties;
use crate::config::sources::{DefaultsSource, SettingsSource};
use crate::config::{ACCOUNT_FILE, CONFIG_FILE};
use crate::error::{BootstrapError, ConfigError, RemoteCopyError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment that triggers the remote account bootstrap
pub const REMOTE_ENV: &str = "remote";

/// Synthetic key pointing at the resolved configuration directory
pub const CONFIG_PATH_KEY: &str = "config.path";

/// Remote account seed, relative to the working directory
pub const REMOTE_ACCOUNTS_SOURCE: &[&str] = &["data", "geth", "remote", ACCOUNT_FILE];

/// How the config file was brought up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    /// Directory or file was missing; created from packaged defaults
    Seeded,
    /// Existing file merged over packaged env defaults
    Reconciled,
}

/// Settings resolved by a bootstrap run.
///
/// Values come from the persisted file, with local properties
/// (`config.path`) always taking precedence. `${key}` references are
/// expanded on lookup against the same precedence; the persisted file keeps
/// them literal.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    environment: String,
    config_dir: PathBuf,
    config_file: PathBuf,
    file_properties: Properties,
    local_properties: Properties,
}

impl ResolvedConfig {
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Value for `key` with placeholders expanded.
    pub fn get(&self, key: &str) -> Option<String> {
        let raw = self.raw(key)?;
        Some(self.expand(raw, &mut vec![key.to_string()]))
    }

    /// Value for `key` as written, placeholders untouched.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.local_properties
            .get(key)
            .or_else(|| self.file_properties.get(key))
    }

    /// Properties exactly as persisted
    pub fn file_properties(&self) -> &Properties {
        &self.file_properties
    }

    /// Effective properties: file values overlaid with local overrides,
    /// placeholders expanded
    pub fn properties(&self) -> Properties {
        let mut merged = self.file_properties.clone();
        merged.overlay(&self.local_properties);
        merged
            .keys()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect()
    }

    /// Expand `${name}` references. Undefined names and references back
    /// into `visiting` are left as written.
    fn expand(&self, text: &str, visiting: &mut Vec<String>) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                return out;
            };
            let name = &after[..end];
            match self.raw(name) {
                Some(value) if !visiting.iter().any(|v| v == name) => {
                    visiting.push(name.to_string());
                    let expanded = self.expand(value, visiting);
                    visiting.pop();
                    out.push_str(&expanded);
                }
                _ => out.push_str(&rest[start..start + end + 3]),
            }
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Record of the remote account seed step
#[derive(Debug)]
pub struct RemoteSeed {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Tolerated copy failure, if any
    pub copy_error: Option<RemoteCopyError>,
    /// Contents read back from the destination
    pub content: String,
}

/// Result of a successful bootstrap run
#[derive(Debug)]
pub struct BootstrapOutcome {
    pub state: BootstrapState,
    pub config: ResolvedConfig,
    pub remote: Option<RemoteSeed>,
}

/// Orchestrates directory resolution, seeding/reconciliation and the remote
/// account bootstrap.
pub struct ConfigBootstrapper<'a> {
    settings: &'a dyn SettingsSource,
    resolver: PathResolver<'a>,
    merger: PropertyMerger<'a>,
}

impl<'a> ConfigBootstrapper<'a> {
    pub fn new(settings: &'a dyn SettingsSource, defaults: &'a dyn DefaultsSource) -> Self {
        Self {
            settings,
            resolver: PathResolver::new(settings),
            merger: PropertyMerger::new(defaults),
        }
    }

    /// Resolve the configuration directory and bootstrap it.
    pub fn bootstrap(&self) -> Result<BootstrapOutcome, BootstrapError> {
        // Checked before resolution so a missing env never touches the filesystem
        self.resolver.environment()?;
        let config_dir = self.resolver.config_dir()?;
        self.bootstrap_dir(&config_dir)
    }

    /// Bootstrap an explicit configuration directory.
    pub fn bootstrap_dir(&self, config_dir: &Path) -> Result<BootstrapOutcome, BootstrapError> {
        let env = self.resolver.environment()?;

        info!(config_dir = %config_dir.display(), env = %env, "eth.config.dir resolved");

        let config_file = config_dir.join(CONFIG_FILE);
        let state = if !config_dir.exists() || !config_file.exists() {
            debug!("Config dir does not exist, will init");
            create_config_dir(config_dir)?;
            self.seed(&config_file, &env)?;
            BootstrapState::Seeded
        } else {
            let merged = self.merger.merge_onto_existing(&config_file, &env)?;
            persist(&merged, &config_file)?;
            BootstrapState::Reconciled
        };

        let mut local_properties = Properties::new();
        local_properties.set(CONFIG_PATH_KEY, config_dir.display().to_string());

        info!(config_file = %config_file.display(), state = ?state, "Loading config");
        let config = ResolvedConfig {
            environment: env.clone(),
            config_dir: config_dir.to_path_buf(),
            file_properties: Properties::load_file(&config_file)?,
            config_file,
            local_properties,
        };

        let remote = if env == REMOTE_ENV {
            Some(self.seed_remote_accounts(config_dir)?)
        } else {
            None
        };

        Ok(BootstrapOutcome {
            state,
            config,
            remote,
        })
    }

    fn seed(&self, config_file: &Path, env: &str) -> Result<(), BootstrapError> {
        info!(
            source = %self.merger.describe_env_defaults(env),
            "Initializing new config"
        );
        let merged = self.merger.load_packaged_defaults(env)?;
        persist(&merged, config_file)
    }

    /// Copy the remote account file into `config_dir`. A failed copy is
    /// tolerated; failing to read the destination afterwards is not.
    fn seed_remote_accounts(&self, config_dir: &Path) -> Result<RemoteSeed, BootstrapError> {
        let source = self.remote_accounts_source();
        let destination = AccountStore::account_file(config_dir);

        let copy_error = match std::fs::copy(&source, &destination) {
            Ok(bytes) => {
                debug!(
                    source = %source.display(),
                    destination = %destination.display(),
                    bytes,
                    "Copied remote account file"
                );
                None
            }
            Err(e) => {
                let err = RemoteCopyError {
                    source_path: source.clone(),
                    dest_path: config_dir.to_path_buf(),
                    source: e,
                };
                warn!(error = %err, "Remote account copy failed; continuing");
                Some(err)
            }
        };

        let content =
            std::fs::read_to_string(&destination).map_err(|e| BootstrapError::VerifyRead {
                path: destination.clone(),
                source: e,
            })?;
        debug!(content = %content, "File content is");

        Ok(RemoteSeed {
            source,
            destination,
            copy_error,
            content,
        })
    }

    fn remote_accounts_source(&self) -> PathBuf {
        match self.settings.working_dir() {
            Ok(cwd) => expand_path(&cwd, REMOTE_ACCOUNTS_SOURCE),
            Err(e) => {
                debug!(error = %e, "Working dir unavailable; using relative remote source");
                REMOTE_ACCOUNTS_SOURCE.iter().collect()
            }
        }
    }
}

fn create_config_dir(config_dir: &Path) -> Result<(), ConfigError> {
    std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::CreateDir {
        path: config_dir.to_path_buf(),
        source: e,
    })?;
    if !config_dir.is_dir() {
        return Err(ConfigError::CreateDir {
            path: config_dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        });
    }
    Ok(())
}
