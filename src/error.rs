//! Error types for the Cakeshop configuration bootstrap.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors raised before or while resolving the config directory
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Process setting '{0}' not set; unable to load config")]
    EnvironmentUnset(&'static str),

    #[error("Unable to create config dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Fatal bootstrap errors
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Packaged resource not found: {0}")]
    ResourceMissing(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed properties in {path} at line {line}: {message}")]
    Decode {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read back account file {path}: {source}")]
    VerifyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed account data in {path}: {reason}")]
    MalformedData { path: PathBuf, reason: String },
}

impl BootstrapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BootstrapError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure copying the remote account seed file.
///
/// Logged and recorded on the bootstrap outcome; never converted into a
/// [`BootstrapError`].
#[derive(Debug, Error)]
#[error("Exception on copy {source_path} -> {dest_path}: {source}")]
pub struct RemoteCopyError {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
