//! # handparse-engine: PokerStars Hand History Parser Core
//!
//! Turns the text of a PokerStars tournament hand history into one
//! [`record::HandRecord`] per hand: players and seating, actions in order,
//! board cards, and the tracked player's hole cards.
//!
//! ## Core Modules
//!
//! - [`segmenter`] - Splits a line stream into per-hand blocks
//! - [`line`] - Classifies one line into a [`line::LineKind`]
//! - [`builder`] - Folds a block into a record and assigns button positions
//! - [`record`] - HandRecord, PlayerRecord, ActionRecord and their serde forms
//! - [`writer`] - JSON Lines output
//! - [`errors`] - Block-level failures
//!
//! ## Quick Start
//!
//! ```rust
//! use handparse_engine::builder::{HandParser, ParserConfig};
//!
//! let log = "\
//! PokerStars Hand #101: Tournament #9, Hold'em No Limit - 2024/05/11 21:04:07 CET
//! Table '9 1' 9-max Seat #2 is the button
//! Seat 1: Alice (1500 in chips)
//! Seat 2: Bob (1500 in chips, €2.50 bounty)
//! Dealt to Alice [Ah Kd]
//! Bob: raises 40 to 60
//! Alice: calls 40
//! *** FLOP *** [2c 7d Ts]
//! *** SUMMARY ***
//! Total pot 120
//! ";
//!
//! let mut parser = HandParser::new(ParserConfig::new("Alice"));
//! let hands = parser.parse_all(log.lines()).unwrap();
//!
//! // The summary body after the marker forms a block of its own
//! assert_eq!(hands.len(), 2);
//! assert!(hands[1].is_empty());
//!
//! let hand = &hands[0];
//! assert_eq!(hand.hand_id.as_deref(), Some("101"));
//! assert_eq!(hand.board, vec!["2c", "7d", "Ts"]);
//! assert_eq!(hand.hero().unwrap().name, "Alice");
//! ```

pub mod builder;
pub mod errors;
pub mod line;
pub mod record;
pub mod segmenter;
pub mod writer;

pub use builder::{HandParser, ParserConfig, TrackingMode};
pub use errors::HandError;
pub use record::{ActionRecord, HandRecord, HoleCards, PlayerRecord, Position};
