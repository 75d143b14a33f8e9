//! CLI route: run context and single route table.

use crate::cli::parse::{Cli, Commands};
use crate::cli::presentation::{format_accounts, format_bootstrap_summary, format_properties};
use crate::config::paths::ENV_PROFILE_PROPERTY;
use crate::config::{
    AccountStore, ConfigBootstrapper, DefaultsSource, DirectoryDefaults, EmbeddedDefaults,
    PathResolver, ProcessSettings,
};
use crate::error::BootstrapError;
use tracing::debug;

/// Runtime context for CLI execution: process settings and packaged defaults.
pub struct RunContext {
    settings: ProcessSettings,
    defaults: Box<dyn DefaultsSource>,
}

impl RunContext {
    /// Build the context from parsed CLI flags.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut settings = ProcessSettings::new().with_properties(cli.define.iter().cloned());
        if let Some(ref profile) = cli.profile {
            settings = settings.with_property(ENV_PROFILE_PROPERTY, profile.clone());
        }
        if let Some(ref root) = cli.install_root {
            settings = settings.with_install_root(root.clone());
        }

        let defaults: Box<dyn DefaultsSource> = match cli.defaults_dir {
            Some(ref dir) => Box::new(DirectoryDefaults::new(dir.clone())),
            None => Box::new(EmbeddedDefaults),
        };

        Self { settings, defaults }
    }

    pub fn new(settings: ProcessSettings, defaults: Box<dyn DefaultsSource>) -> Self {
        Self { settings, defaults }
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, BootstrapError> {
        debug!(command = ?command, "Executing command");
        match command {
            Commands::Init => {
                let outcome = self.bootstrapper().bootstrap()?;
                Ok(format_bootstrap_summary(&outcome))
            }
            Commands::Path => {
                let dir = PathResolver::new(&self.settings).config_dir()?;
                Ok(dir.display().to_string())
            }
            Commands::Show => {
                let outcome = self.bootstrapper().bootstrap()?;
                Ok(format_properties(&outcome.config.properties()))
            }
            Commands::Accounts => {
                let accounts =
                    AccountStore::new().load_resolved(&PathResolver::new(&self.settings))?;
                Ok(format_accounts(&accounts))
            }
        }
    }

    fn bootstrapper(&self) -> ConfigBootstrapper<'_> {
        ConfigBootstrapper::new(&self.settings, self.defaults.as_ref())
    }
}
