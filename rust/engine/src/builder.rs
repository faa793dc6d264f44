//! Builds one [`HandRecord`] per block.
//!
//! Pass 1 classifies every line and folds it into an [`Accumulator`]. Pass 2
//! runs only once the block is exhausted: positions are derived from the
//! button seat (which may appear anywhere in the block) and the tracked
//! player's hole cards are attached.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::errors::{HandError, HandLabel};
use crate::line::{classify, LineKind};
use crate::record::{ActionRecord, HandRecord, HoleCards, PlayerRecord, Position};
use crate::segmenter::{segment, segment_reader, ReaderBlocks, Segmenter};

/// How the tracked player's name evolves while parsing.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingMode {
    /// The configured name never changes.
    #[default]
    Fixed,
    /// Every seat line replaces the tracked name with the seated player's
    /// name, and the replacement carries over into later hands. Hole cards
    /// then follow whoever was seated last when the `Dealt to` line and the
    /// end of the block are reached.
    FollowSeatLines,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Name whose `Dealt to` line supplies hole cards
    pub player_name: String,
    #[serde(default)]
    pub tracking: TrackingMode,
}

impl ParserConfig {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            tracking: TrackingMode::Fixed,
        }
    }

    pub fn with_tracking(mut self, tracking: TrackingMode) -> Self {
        self.tracking = tracking;
        self
    }
}

/// Per-block state collected during pass 1.
#[derive(Debug, Default)]
struct Accumulator {
    record: HandRecord,
    button_seat: Option<u32>,
    player_cards: Option<String>,
}

impl Accumulator {
    fn label(&self) -> HandLabel {
        HandLabel(self.record.hand_id.clone())
    }

    /// Pass 2. Consumes the accumulator, so no line can follow it.
    fn finish(mut self, tracked_player: &str) -> Result<HandRecord, HandError> {
        if let Some(button_seat) = self.button_seat {
            let label = self.label();
            assign_positions(&mut self.record.players, button_seat, label)?;
        }

        for player in self
            .record
            .players
            .iter_mut()
            .filter(|p| p.name == tracked_player)
        {
            player.hole_cards = Some(match &self.player_cards {
                Some(cards) => HoleCards::Dealt(cards.clone()),
                None => HoleCards::NotDealt,
            });
            tracing::debug!(player = tracked_player, hole_cards = ?player.hole_cards, "attached hole cards");
        }

        Ok(self.record)
    }
}

/// Sort `players` by seat and label each one relative to `button_seat`.
///
/// Fails when two players share a seat or nobody sits at the button seat;
/// on failure `players` may be reordered but carries no positions.
pub fn assign_positions(
    players: &mut [PlayerRecord],
    button_seat: u32,
    hand: HandLabel,
) -> Result<(), HandError> {
    players.sort_by_key(|p| p.seat);

    if let Some(pair) = players.windows(2).find(|w| w[0].seat == w[1].seat) {
        return Err(HandError::DuplicateSeat {
            hand,
            seat: pair[0].seat,
        });
    }

    let button_index = players
        .iter()
        .position(|p| p.seat == button_seat)
        .ok_or(HandError::ButtonSeatVacant {
            hand,
            seat: button_seat,
        })?;

    let n = players.len();
    for (i, player) in players.iter_mut().enumerate() {
        player.position = Some(Position::from_offset((i + n - button_index) % n));
    }
    Ok(())
}

/// Turns hand blocks into records.
///
/// The parser owns the tracked player's name. Under
/// [`TrackingMode::FollowSeatLines`] that name is the only state shared
/// between blocks; under [`TrackingMode::Fixed`] every block is independent.
#[derive(Debug, Clone)]
pub struct HandParser {
    config: ParserConfig,
    tracked: String,
}

impl HandParser {
    pub fn new(config: ParserConfig) -> Self {
        let tracked = config.player_name.clone();
        Self { config, tracked }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Name currently used to match `Dealt to` lines and attach hole cards.
    pub fn tracked_player(&self) -> &str {
        &self.tracked
    }

    /// Build one hand from one block of trimmed, non-empty lines.
    ///
    /// # Errors
    ///
    /// [`HandError::ButtonSeatVacant`] and [`HandError::DuplicateSeat`] when
    /// the block names a button but its seating is inconsistent. The error
    /// carries the hand id when the header line was already seen.
    ///
    /// # Example
    ///
    /// ```
    /// use handparse_engine::builder::{HandParser, ParserConfig};
    /// use handparse_engine::record::Position;
    ///
    /// let mut parser = HandParser::new(ParserConfig::new("Alice"));
    /// let hand = parser
    ///     .build(&[
    ///         "Seat 1: Alice (1500 in chips)",
    ///         "Seat 2: Bob (1500 in chips)",
    ///         "Seat #2 is the button",
    ///     ])
    ///     .unwrap();
    /// assert_eq!(hand.players[1].position, Some(Position::Button));
    /// assert_eq!(hand.players[0].position, Some(Position::ButtonPlus(1)));
    /// ```
    pub fn build<S: AsRef<str>>(&mut self, block: &[S]) -> Result<HandRecord, HandError> {
        let mut acc = Accumulator::default();
        for line in block {
            let line = line.as_ref();
            match classify(line, &self.tracked) {
                Some(kind) => {
                    tracing::debug!(rule = ?kind.rule(), line, "classified line");
                    self.absorb(&mut acc, kind);
                }
                None => tracing::trace!(line, "unrecognized line"),
            }
        }
        acc.finish(&self.tracked)
    }

    fn absorb(&mut self, acc: &mut Accumulator, kind: LineKind) {
        let rec = &mut acc.record;
        match kind {
            LineKind::Header {
                hand_id,
                tournament_id,
                date,
            } => {
                rec.hand_id = hand_id;
                rec.tournament_id = tournament_id;
                rec.date = date;
            }
            LineKind::Table { name, button_seat } => {
                rec.table = Some(name);
                if let Some(seat) = button_seat {
                    tracing::debug!(seat, "button seat");
                    acc.button_seat = Some(seat);
                }
            }
            LineKind::ButtonSeat(seat) => {
                tracing::debug!(seat, "button seat");
                acc.button_seat = Some(seat);
            }
            LineKind::Seat {
                seat,
                name,
                chips,
                bounty,
            } => {
                if self.config.tracking == TrackingMode::FollowSeatLines {
                    self.tracked.clone_from(&name);
                }
                rec.players.push(PlayerRecord {
                    name,
                    chips,
                    bounty,
                    seat,
                    position: None,
                    hole_cards: None,
                });
            }
            LineKind::Action { player, action } => {
                rec.actions.push(ActionRecord { player, action });
            }
            LineKind::HoleCards { cards } => {
                tracing::debug!(player = %self.tracked, cards = %cards, "hole cards");
                acc.player_cards = Some(cards);
            }
            LineKind::Flop(cards) => rec.board.extend(cards),
            LineKind::Turn(card) | LineKind::River(card) => rec.board.push(card),
        }
    }

    /// Lazily parse every hand in `lines`, in order.
    ///
    /// A block that fails its finishing pass yields an `Err` and parsing
    /// continues with the next block.
    pub fn parse_lines<I>(&mut self, lines: I) -> Hands<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Hands {
            parser: self,
            blocks: segment(lines),
        }
    }

    /// Parse every hand, stopping at the first failed block.
    pub fn parse_all<I>(&mut self, lines: I) -> Result<Vec<HandRecord>, HandError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.parse_lines(lines).collect()
    }

    /// Like [`HandParser::parse_lines`], reading from a buffered reader.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> ReaderHands<'_, R> {
        ReaderHands {
            parser: self,
            blocks: segment_reader(reader),
        }
    }
}

/// Iterator returned by [`HandParser::parse_lines`].
#[derive(Debug)]
pub struct Hands<'p, I> {
    parser: &'p mut HandParser,
    blocks: Segmenter<I>,
}

impl<I, S> Iterator for Hands<'_, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<HandRecord, HandError>;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.next()?;
        Some(self.parser.build(&block))
    }
}

/// Iterator returned by [`HandParser::parse_reader`].
#[derive(Debug)]
pub struct ReaderHands<'p, R> {
    parser: &'p mut HandParser,
    blocks: ReaderBlocks<R>,
}

impl<R: BufRead> Iterator for ReaderHands<'_, R> {
    type Item = Result<HandRecord, HandError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.blocks.next()? {
            Ok(block) => Some(self.parser.build(&block)),
            Err(e) => Some(Err(HandError::from(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, seat: u32) -> PlayerRecord {
        PlayerRecord {
            name: name.into(),
            chips: 1500,
            bounty: 0.0,
            seat,
            position: None,
            hole_cards: None,
        }
    }

    fn labels(players: &[PlayerRecord]) -> Vec<(u32, String)> {
        players
            .iter()
            .map(|p| (p.seat, p.position.map(|x| x.to_string()).unwrap_or_default()))
            .collect()
    }

    #[test]
    fn test_positions_wrap_past_highest_seat() {
        let mut players = vec![player("d", 9), player("a", 1), player("c", 6), player("b", 3)];
        assign_positions(&mut players, 6, HandLabel::default()).unwrap();
        assert_eq!(
            labels(&players),
            vec![
                (1, "Button+2".to_string()),
                (3, "Button+3".to_string()),
                (6, "Button".to_string()),
                (9, "Button+1".to_string()),
            ]
        );
    }

    #[test]
    fn test_positions_single_player() {
        let mut players = vec![player("a", 4)];
        assign_positions(&mut players, 4, HandLabel::default()).unwrap();
        assert_eq!(players[0].position, Some(Position::Button));
    }

    #[test]
    fn test_vacant_button_seat_is_an_error() {
        let mut players = vec![player("a", 1), player("b", 2)];
        let err = assign_positions(&mut players, 5, HandLabel(Some("77".into()))).unwrap_err();
        assert_eq!(
            err,
            HandError::ButtonSeatVacant {
                hand: HandLabel(Some("77".into())),
                seat: 5
            }
        );
        assert!(players.iter().all(|p| p.position.is_none()));
    }

    #[test]
    fn test_duplicate_seat_is_an_error() {
        let mut players = vec![player("a", 2), player("b", 2)];
        let err = assign_positions(&mut players, 2, HandLabel::default()).unwrap_err();
        assert!(matches!(err, HandError::DuplicateSeat { seat: 2, .. }));
    }

    #[test]
    fn test_button_line_after_actions_still_applies() {
        let mut parser = HandParser::new(ParserConfig::new("Alice"));
        let hand = parser
            .build(&[
                "Seat 2: Bob (1500 in chips)",
                "Seat 1: Alice (1500 in chips)",
                "Bob: folds",
                "Seat #1 is the button",
            ])
            .unwrap();
        assert_eq!(labels(&hand.players), vec![
            (1, "Button".to_string()),
            (2, "Button+1".to_string()),
        ]);
    }

    #[test]
    fn test_last_button_line_wins() {
        let mut parser = HandParser::new(ParserConfig::new("Alice"));
        let hand = parser
            .build(&[
                "Table 'T' 9-max Seat #1 is the button",
                "Seat 1: Alice (1500 in chips)",
                "Seat 2: Bob (1500 in chips)",
                "Seat #2 is the button",
            ])
            .unwrap();
        assert_eq!(hand.button().map(|p| p.name.as_str()), Some("Bob"));
    }

    #[test]
    fn test_no_button_keeps_insertion_order() {
        let mut parser = HandParser::new(ParserConfig::new("Alice"));
        let hand = parser
            .build(&["Seat 3: Carol (10 in chips)", "Seat 1: Alice (20 in chips)"])
            .unwrap();
        let seats: Vec<u32> = hand.players.iter().map(|p| p.seat).collect();
        assert_eq!(seats, vec![3, 1]);
        assert!(hand.players.iter().all(|p| p.position.is_none()));
    }

    #[test]
    fn test_last_hole_card_line_wins() {
        let mut parser = HandParser::new(ParserConfig::new("Alice"));
        let hand = parser
            .build(&[
                "Seat 1: Alice (1500 in chips)",
                "Dealt to Alice [2c 3d]",
                "Dealt to Alice [Ah Kd]",
            ])
            .unwrap();
        assert_eq!(
            hand.players[0].hole_cards,
            Some(HoleCards::Dealt("Ah Kd".into()))
        );
    }

    #[test]
    fn test_fixed_mode_does_not_follow_seat_lines() {
        let mut parser = HandParser::new(ParserConfig::new("Alice"));
        parser
            .build(&["Seat 1: Alice (1500 in chips)", "Seat 2: Bob (1500 in chips)"])
            .unwrap();
        assert_eq!(parser.tracked_player(), "Alice");
    }

    #[test]
    fn test_follow_mode_tracks_last_seat_line() {
        let config = ParserConfig::new("Alice").with_tracking(TrackingMode::FollowSeatLines);
        let mut parser = HandParser::new(config);
        parser
            .build(&["Seat 1: Alice (1500 in chips)", "Seat 2: Bob (1500 in chips)"])
            .unwrap();
        assert_eq!(parser.tracked_player(), "Bob");
    }
}
