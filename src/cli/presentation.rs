//! Command presentation: text formatters for bootstrap results.

use crate::config::{BootstrapOutcome, BootstrapState, Properties};
use std::collections::BTreeMap;

pub fn format_bootstrap_summary(outcome: &BootstrapOutcome) -> String {
    let config = &outcome.config;
    let action = match outcome.state {
        BootstrapState::Seeded => "Seeded from packaged defaults",
        BootstrapState::Reconciled => "Reconciled with packaged defaults",
    };

    let mut output = format!("Cakeshop configuration ({})\n\n", config.environment());
    output.push_str(&format!("  {}\n", action));
    output.push_str(&format!("  Config dir:  {}\n", config.config_dir().display()));
    output.push_str(&format!("  Config file: {}\n", config.config_file().display()));
    output.push_str(&format!(
        "  Properties:  {}\n",
        config.file_properties().len()
    ));

    if let Some(ref remote) = outcome.remote {
        output.push('\n');
        match remote.copy_error {
            Some(ref err) => output.push_str(&format!(
                "  Remote accounts: copy failed ({}); kept existing {}\n",
                err,
                remote.destination.display()
            )),
            None => output.push_str(&format!(
                "  Remote accounts: copied {} -> {}\n",
                remote.source.display(),
                remote.destination.display()
            )),
        }
    }
    output
}

pub fn format_properties(props: &Properties) -> String {
    props.to_text()
}

/// Account addresses only; unlock secrets are never printed.
pub fn format_accounts(accounts: &BTreeMap<String, String>) -> String {
    if accounts.is_empty() {
        return "No accounts configured.\n".to_string();
    }
    let mut output = format!("{} account(s):\n", accounts.len());
    for address in accounts.keys() {
        output.push_str(&format!("  - {}\n", address));
    }
    output
}
