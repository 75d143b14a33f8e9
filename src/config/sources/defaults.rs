//! Packaged default sources: `config/application.properties` and
//! `config/application-<env>.properties`.
//!
//! Defaults are embedded in the binary at build time; a distribution may
//! instead ship them as a directory next to the install.

use crate::config::properties::decode_text;
use crate::error::BootstrapError;
use std::path::PathBuf;

/// Packaged defaults embedded in binary at compile time
pub const EMBEDDED_DEFAULTS: &[(&str, &str)] = &[
    (
        "config/application.properties",
        include_str!("../../../resources/config/application.properties"),
    ),
    (
        "config/application-local.properties",
        include_str!("../../../resources/config/application-local.properties"),
    ),
    (
        "config/application-remote.properties",
        include_str!("../../../resources/config/application-remote.properties"),
    ),
    (
        "config/application-production.properties",
        include_str!("../../../resources/config/application-production.properties"),
    ),
    (
        "config/application-test.properties",
        include_str!("../../../resources/config/application-test.properties"),
    ),
];

/// Read-only lookup of packaged resources by relative name (`config/...`).
pub trait DefaultsSource {
    /// Resource text, or `None` when the resource is not packaged.
    fn read(&self, name: &str) -> Result<Option<String>, BootstrapError>;

    /// Human-readable location of a resource, for log lines.
    fn describe(&self, name: &str) -> String;
}

/// Defaults compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDefaults;

impl DefaultsSource for EmbeddedDefaults {
    fn read(&self, name: &str) -> Result<Option<String>, BootstrapError> {
        Ok(EMBEDDED_DEFAULTS
            .iter()
            .find(|(resource, _)| *resource == name)
            .map(|(_, content)| content.to_string()))
    }

    fn describe(&self, name: &str) -> String {
        format!("embedded:{}", name)
    }
}

/// Defaults read from a directory on disk (the directory that contains `config/`)
#[derive(Debug, Clone)]
pub struct DirectoryDefaults {
    root: PathBuf,
}

impl DirectoryDefaults {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

impl DefaultsSource for DirectoryDefaults {
    fn read(&self, name: &str) -> Result<Option<String>, BootstrapError> {
        let path = self.path_for(name);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(decode_text(bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BootstrapError::io(path, e)),
        }
    }

    fn describe(&self, name: &str) -> String {
        self.path_for(name).display().to_string()
    }
}
