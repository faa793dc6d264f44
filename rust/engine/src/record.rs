use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text stored in place of hole cards when the tracked player was seated but
/// no `Dealt to` line was seen.
pub const NO_CARDS_DEALT: &str = "No cards dealt";

/// Seat position relative to the button.
///
/// Labels run clockwise in seat order: the button itself, then `Button+1`
/// for the next occupied seat, wrapping past the highest seat number.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Position {
    /// The seat holding the dealer button
    Button,
    /// N occupied seats after the button (N >= 1)
    ButtonPlus(usize),
}

impl Position {
    /// Label for a player `offset` occupied seats after the button.
    pub fn from_offset(offset: usize) -> Self {
        if offset == 0 {
            Position::Button
        } else {
            Position::ButtonPlus(offset)
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Position::Button => 0,
            Position::ButtonPlus(n) => *n,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Button => write!(f, "Button"),
            Position::ButtonPlus(n) => write!(f, "Button+{}", n),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Button" {
            return Ok(Position::Button);
        }
        match s.strip_prefix("Button+").map(str::parse::<usize>) {
            Some(Ok(n)) if n > 0 => Ok(Position::ButtonPlus(n)),
            _ => Err(format!("Invalid position label: {}", s)),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hole cards attached to the tracked player.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum HoleCards {
    /// Bracketed card text from the `Dealt to` line, e.g. `"Ah Kd"`
    Dealt(String),
    /// The tracked player was seated but no cards were shown
    NotDealt,
}

impl HoleCards {
    pub fn cards(&self) -> Option<&str> {
        match self {
            HoleCards::Dealt(c) => Some(c),
            HoleCards::NotDealt => None,
        }
    }
}

impl Serialize for HoleCards {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            HoleCards::Dealt(c) => serializer.serialize_str(c),
            HoleCards::NotDealt => serializer.serialize_str(NO_CARDS_DEALT),
        }
    }
}

impl<'de> Deserialize<'de> for HoleCards {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(if s == NO_CARDS_DEALT {
            HoleCards::NotDealt
        } else {
            HoleCards::Dealt(s)
        })
    }
}

/// One seat's occupant for one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Stack size at the start of the hand
    pub chips: u64,
    /// Bounty on this player's head, 0.0 when the seat line has none
    #[serde(default)]
    pub bounty: f64,
    /// 1-based seat number, unique within a hand
    pub seat: u32,
    /// Only set when the block named a button seat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Only set for the tracked player
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<HoleCards>,
}

/// A single `actor: description` line, kept verbatim.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Actor token before the colon
    pub player: String,
    /// Remainder of the line, not further parsed
    pub action: String,
}

/// Complete record of one parsed hand.
/// Serialized to JSONL by [`crate::writer::HandWriter`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HandRecord {
    /// Numeric hand identifier from the header line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_id: Option<String>,
    /// Numeric tournament identifier from the header line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    /// Local time printed in the header (`YYYY/MM/DD HH:MM:SS`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
    /// Table name from the quoted part of the table line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Seat order once positions are assigned, otherwise line order
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    /// Chronological list of action lines
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    /// Community cards: flop, turn, river
    #[serde(default)]
    pub board: Vec<String>,
}

impl HandRecord {
    pub fn player(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The player carrying hole cards, if any.
    pub fn hero(&self) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.hole_cards.is_some())
    }

    pub fn button(&self) -> Option<&PlayerRecord> {
        self.players
            .iter()
            .find(|p| p.position == Some(Position::Button))
    }

    /// True when no line of the block was recognized, e.g. the body of a
    /// summary section.
    pub fn is_empty(&self) -> bool {
        *self == HandRecord::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_labels() {
        assert_eq!(Position::from_offset(0).to_string(), "Button");
        assert_eq!(Position::from_offset(3).to_string(), "Button+3");
        assert_eq!("Button+2".parse::<Position>(), Ok(Position::ButtonPlus(2)));
        assert!("Button+0".parse::<Position>().is_err());
        assert!("SB".parse::<Position>().is_err());
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let p = PlayerRecord {
            name: "Alice".into(),
            chips: 1500,
            bounty: 0.0,
            seat: 1,
            position: None,
            hole_cards: None,
        };
        let v = serde_json::to_value(&p).unwrap();
        assert!(v.get("position").is_none());
        assert!(v.get("hole_cards").is_none());
        assert_eq!(v["bounty"], 0.0);
    }

    #[test]
    fn test_sentinel_hole_cards_serialize_as_text() {
        let p = PlayerRecord {
            name: "Alice".into(),
            chips: 1500,
            bounty: 2.5,
            seat: 1,
            position: Some(Position::ButtonPlus(1)),
            hole_cards: Some(HoleCards::NotDealt),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["hole_cards"], "No cards dealt");
        assert_eq!(v["position"], "Button+1");

        let back: PlayerRecord = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_lookup_helpers() {
        let rec = HandRecord {
            players: vec![
                PlayerRecord {
                    name: "Alice".into(),
                    chips: 1500,
                    bounty: 0.0,
                    seat: 1,
                    position: Some(Position::ButtonPlus(1)),
                    hole_cards: Some(HoleCards::Dealt("Ah Kd".into())),
                },
                PlayerRecord {
                    name: "Bob".into(),
                    chips: 1500,
                    bounty: 0.0,
                    seat: 2,
                    position: Some(Position::Button),
                    hole_cards: None,
                },
            ],
            ..Default::default()
        };
        assert_eq!(rec.button().map(|p| p.name.as_str()), Some("Bob"));
        assert_eq!(rec.hero().map(|p| p.name.as_str()), Some("Alice"));
        assert_eq!(rec.player("Bob").map(|p| p.seat), Some(2));
        assert!(rec.player("Carol").is_none());
    }
}
