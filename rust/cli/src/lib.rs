//! # handparse CLI Library
//!
//! Command-line front end for `handparse-engine`. It supplies what the
//! engine leaves to its callers: configuration of the tracked player, file
//! input (plain or Zstandard-compressed), record serialization and logging.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handparse", "parse", "--input", "hands.txt", "--player", "Alice"];
//! let code = handparse_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `parse`: Parse a hand history into JSONL or a JSON array
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::{Read, Write};
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod io_utils;
pub mod logging;
mod macros;
pub mod ui;

use cli::{Commands, HandparseCli};
use commands::{handle_cfg_command, handle_parse_command};

pub use commands::ParseSummary;
pub use error::{BatchValidationError, CliError};

/// Main entry point for the CLI application, reading `-` input from the
/// process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    run_with_stdin(args, &mut std::io::stdin(), out, err)
}

/// Like [`run`], with an explicit stream for `--input -`.
pub fn run_with_stdin<I, S>(
    args: I,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandparseCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Parse(args) => handle_parse_command(&args, stdin, out, err).map(|_| ()),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    match result {
        Ok(()) => exit_code::SUCCESS,
        // Config and parse failures were already reported by the handler
        Err(e @ (CliError::Io(_) | CliError::InvalidInput(_))) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            exit_code::ERROR
        }
    }
}
