//! Command handler modules for the handparse CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `handle_COMMAND_command(...) -> Result<_, CliError>`
//! - Output streams (`&mut dyn Write`) passed in as parameters
//! - Errors propagated via the `CliError` enum

mod cfg;
mod parse;

pub use cfg::handle_cfg_command;
pub use parse::{ParseSummary, handle_parse_command};
