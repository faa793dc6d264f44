//! Error types for the CLI application.
//!
//! ## Per-hand failures
//!
//! `BatchValidationError<T>` pairs a failed item with its message. The
//! `parse` command uses it to report hands that could not be finished
//! (for example a button seat nobody occupies) while carrying on with the
//! rest of the file.

use handparse_engine::HandError;
use std::fmt;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// A hand block failed in strict mode
    Parse(HandError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<HandError> for CliError {
    fn from(error: HandError) -> Self {
        CliError::Parse(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// A failed item and why it failed.
///
/// # Examples
///
/// ```rust
/// use handparse_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "block 5".to_string(),
///     message: "hand #12: seat 2 is occupied by more than one player".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "block 5: hand #12: seat 2 is occupied by more than one player"
/// );
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
