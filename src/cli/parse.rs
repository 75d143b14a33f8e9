//! CLI parse: clap types for cakeshop-config. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cakeshop configuration bootstrap
#[derive(Parser, Debug)]
#[command(name = "cakeshop-config")]
#[command(about = "Resolve, seed and reconcile the Cakeshop configuration directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Active environment name (sets spring.profiles.active)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Process setting, e.g. -D eth.config.dir=/srv/cakeshop (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", value_parser = parse_define, global = true)]
    pub define: Vec<(String, String)>,

    /// Installation root (defaults to the directory of this executable)
    #[arg(long, global = true)]
    pub install_root: Option<PathBuf>,

    /// Directory containing config/application*.properties (defaults to the embedded set)
    #[arg(long, global = true)]
    pub defaults_dir: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Seed or reconcile the configuration directory
    Init,
    /// Print the resolved configuration directory
    Path,
    /// Bootstrap, then print the effective properties
    Show,
    /// List account addresses from accounts.json (secrets are not printed)
    Accounts,
}

/// Parse a `KEY=VALUE` process setting.
pub fn parse_define(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
