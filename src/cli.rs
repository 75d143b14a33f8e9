//! CLI domain: parse, route and presentation only.
//! Bootstrap logic lives in `config`; the route table just calls into it.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{parse_define, Cli, Commands};
pub use presentation::{format_accounts, format_bootstrap_summary, format_properties};
pub use route::RunContext;
