use std::fmt;

use thiserror::Error;

/// Failures that make a whole hand block unusable.
///
/// Per-line problems never surface here: lines that fail to classify are
/// skipped. Only the finishing passes (and the reader adapter) produce errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("{hand}: button is at seat {seat} but no player occupies that seat")]
    ButtonSeatVacant { hand: HandLabel, seat: u32 },
    #[error("{hand}: seat {seat} is occupied by more than one player")]
    DuplicateSeat { hand: HandLabel, seat: u32 },
    #[error("Failed to read hand history: {0}")]
    Io(String),
}

impl HandError {
    /// Hand id of the offending block, when the header was already parsed.
    pub fn hand_id(&self) -> Option<&str> {
        match self {
            HandError::ButtonSeatVacant { hand, .. } | HandError::DuplicateSeat { hand, .. } => {
                hand.0.as_deref()
            }
            HandError::Io(_) => None,
        }
    }
}

impl From<std::io::Error> for HandError {
    fn from(e: std::io::Error) -> Self {
        HandError::Io(e.to_string())
    }
}

/// Identifies a block in error messages: `hand #123` or `hand <unknown>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandLabel(pub Option<String>);

impl fmt::Display for HandLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(id) => write!(f, "hand #{}", id),
            None => write!(f, "hand <unknown>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_the_hand() {
        let e = HandError::ButtonSeatVacant {
            hand: HandLabel(Some("250511010".into())),
            seat: 4,
        };
        assert_eq!(
            e.to_string(),
            "hand #250511010: button is at seat 4 but no player occupies that seat"
        );
        assert_eq!(e.hand_id(), Some("250511010"));
    }

    #[test]
    fn test_message_without_header() {
        let e = HandError::DuplicateSeat {
            hand: HandLabel(None),
            seat: 2,
        };
        assert_eq!(
            e.to_string(),
            "hand <unknown>: seat 2 is occupied by more than one player"
        );
        assert_eq!(e.hand_id(), None);
    }
}
