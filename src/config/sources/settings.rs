//! Process settings source: environment variables, process-level settings,
//! installation root and working directory.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// Lookup of everything the bootstrap reads from the surrounding process.
pub trait SettingsSource {
    /// Environment variable value, if set.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Process-level setting (e.g. `-D eth.config.dir=...`), if set.
    fn property(&self, name: &str) -> Option<String>;

    /// Directory the distribution runs from.
    fn install_root(&self) -> io::Result<PathBuf>;

    /// Current working directory of the process.
    fn working_dir(&self) -> io::Result<PathBuf>;
}

/// Settings backed by the real process environment plus an owned map of
/// process-level settings.
#[derive(Debug, Clone, Default)]
pub struct ProcessSettings {
    properties: BTreeMap<String, String>,
    install_root: Option<PathBuf>,
}

impl ProcessSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in properties {
            self.properties.insert(name.into(), value.into());
        }
        self
    }

    /// Override the installation root instead of deriving it from the executable.
    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }
}

impl SettingsSource for ProcessSettings {
    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn install_root(&self) -> io::Result<PathBuf> {
        if let Some(ref root) = self.install_root {
            return Ok(root.clone());
        }
        let exe = dunce::canonicalize(std::env::current_exe()?)?;
        exe.parent().map(PathBuf::from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("executable {} has no parent directory", exe.display()),
            )
        })
    }

    fn working_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

/// Fixed in-memory settings. Nothing is read from the real process.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    env: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
    install_root: Option<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_env_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_install_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.install_root = Some(root.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl SettingsSource for StaticSettings {
    fn env_var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }

    fn property(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }

    fn install_root(&self) -> io::Result<PathBuf> {
        self.install_root
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "install root not configured"))
    }

    fn working_dir(&self) -> io::Result<PathBuf> {
        self.working_dir
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "working dir not configured"))
    }
}
