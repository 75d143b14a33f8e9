//! Merge rules: layer order and conflict handling.
//!
//! Later layers win on key collision. Nothing is ever removed.

use crate::config::properties::Properties;

/// Source layer of a property value, lowest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    BaseDefaults,
    EnvDefaults,
    UserFile,
}

/// Merge layers in precedence order regardless of the order given.
pub fn merge_layers(layers: &mut [(Layer, Properties)]) -> Properties {
    layers.sort_by_key(|(layer, _)| *layer);
    let mut merged = Properties::new();
    for (_, props) in layers.iter() {
        merged.overlay(props);
    }
    merged
}

/// First run: base defaults < env defaults.
pub fn seed(base: Properties, env: Properties) -> Properties {
    merge_layers(&mut [(Layer::BaseDefaults, base), (Layer::EnvDefaults, env)])
}

/// Later runs: env defaults < existing user file.
pub fn reconcile(env: Properties, existing: Properties) -> Properties {
    merge_layers(&mut [(Layer::EnvDefaults, env), (Layer::UserFile, existing)])
}
