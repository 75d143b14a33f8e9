//! Inputs to the bootstrap: process settings and packaged defaults.

pub mod defaults;
pub mod settings;

pub use defaults::{DefaultsSource, DirectoryDefaults, EmbeddedDefaults, EMBEDDED_DEFAULTS};
pub use settings::{ProcessSettings, SettingsSource, StaticSettings};
