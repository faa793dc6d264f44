//! Hand history parse command.
//!
//! Reads a PokerStars tournament log, builds one record per hand and writes
//! the records as JSON Lines (default) or as a JSON array.

use crate::cli::{OutputFormat, ParseArgs};
use crate::config::{self, ConfigOverrides};
use crate::error::{BatchValidationError, CliError};
use crate::io_utils::{ensure_parent_dir, read_input};
use crate::ui;
use handparse_engine::writer::HandWriter;
use handparse_engine::{HandParser, HandRecord};
use std::io::{Read, Write};

/// Counts reported once parsing is done.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseSummary {
    pub parsed: u64,
    pub failed: u64,
    pub empty: u64,
}

/// Handles the parse command.
///
/// # Arguments
///
/// * `args` - Parsed command-line options
/// * `stdin` - Source used when the input path is `-`
/// * `out` - Records go here when no `--output` is given
/// * `err` - Warnings, per-hand failures and the final summary
///
/// # Errors
///
/// `CliError::Config` when no player name is configured or the input cannot
/// be read, `CliError::Parse` for the first failed hand under `--strict`,
/// `CliError::Io` when output cannot be written.
pub fn handle_parse_command(
    args: &ParseArgs,
    stdin: &mut dyn Read,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<ParseSummary, CliError> {
    let overrides = ConfigOverrides {
        player: args.player.clone(),
        follow_seat_names: args.follow_seat_names,
    };
    let resolved = config::load_with_overrides(&overrides).map_err(|e| {
        let _ = ui::write_error(err, &format!("Invalid configuration: {}", e));
        CliError::from(e)
    })?;
    let parser_config = resolved.config.parser_config().map_err(|e| {
        let _ = ui::write_error(err, &e.to_string());
        CliError::from(e)
    })?;

    let content = read_input(&args.input, stdin).map_err(|e| {
        let _ = ui::write_error(err, &format!("Failed to read {}: {}", args.input, e));
        CliError::Config(format!("Failed to read {}: {}", args.input, e))
    })?;

    tracing::info!(input = %args.input, player = %parser_config.player_name, "parsing hand history");
    let mut parser = HandParser::new(parser_config);
    let mut summary = ParseSummary::default();
    let mut hands: Vec<HandRecord> = Vec::new();

    for (idx, result) in parser.parse_lines(content.lines()).enumerate() {
        match result {
            Ok(hand) if hand.is_empty() && !args.keep_empty => summary.empty += 1,
            Ok(hand) => {
                summary.parsed += 1;
                hands.push(hand);
            }
            Err(e) => {
                if args.strict {
                    ui::write_error(err, &e.to_string())?;
                    return Err(CliError::Parse(e));
                }
                summary.failed += 1;
                let failure = BatchValidationError {
                    item_context: format!("block {}", idx + 1),
                    message: e.to_string(),
                };
                ui::display_warning(err, &failure.to_string())?;
            }
        }
    }

    match &args.output {
        Some(path) => {
            ensure_parent_dir(std::path::Path::new(path)).map_err(CliError::InvalidInput)?;
            let file = std::fs::File::create(path).map_err(|e| {
                let _ = ui::write_error(err, &format!("Failed to write {}: {}", path, e));
                CliError::Io(e)
            })?;
            write_records(&hands, args.format, std::io::BufWriter::new(file))?;
        }
        None => write_records(&hands, args.format, &mut *out)?,
    }

    writeln!(
        err,
        "parsed {} hand(s), {} failed",
        summary.parsed, summary.failed
    )?;
    Ok(summary)
}

fn write_records<W: Write>(
    hands: &[HandRecord],
    format: OutputFormat,
    mut w: W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Jsonl => {
            let mut writer = HandWriter::new(w);
            for hand in hands {
                writer.write(hand)?;
            }
        }
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(hands).map_err(|e| {
                CliError::InvalidInput(format!("Failed to serialize JSON: {}", e))
            })?;
            writeln!(w, "{}", s)?;
            w.flush()?;
        }
    }
    Ok(())
}
