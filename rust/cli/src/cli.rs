//! Command-line argument types.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "handparse",
    version,
    about = "Convert PokerStars tournament hand histories into structured records"
)]
pub struct HandparseCli {
    /// Log classification details to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a hand history file into records
    Parse(ParseArgs),
    /// Display the resolved configuration and where each value came from
    Cfg,
}

#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// Hand history file (plain text or .zst); `-` reads stdin
    #[arg(long, short)]
    pub input: String,

    /// Write records here instead of stdout
    #[arg(long, short)]
    pub output: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    /// Tracked player whose hole cards are attached
    #[arg(long)]
    pub player: Option<String>,

    /// Let every seat line replace the tracked player name
    #[arg(long)]
    pub follow_seat_names: bool,

    /// Abort on the first hand that cannot be finished
    #[arg(long)]
    pub strict: bool,

    /// Also emit records for blocks in which no line was recognized
    #[arg(long)]
    pub keep_empty: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Jsonl,
    /// A single pretty-printed JSON array
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = HandparseCli::try_parse_from(["handparse", "parse", "--input", "h.txt"]).unwrap();
        match cli.cmd {
            Commands::Parse(args) => {
                assert_eq!(args.input, "h.txt");
                assert_eq!(args.format, OutputFormat::Jsonl);
                assert!(args.output.is_none());
                assert!(!args.strict);
                assert!(!args.follow_seat_names);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_requires_input() {
        assert!(HandparseCli::try_parse_from(["handparse", "parse"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = HandparseCli::try_parse_from([
            "handparse", "parse", "--input", "h.txt", "--format", "csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = HandparseCli::try_parse_from(["handparse", "cfg", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
