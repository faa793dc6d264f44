//! Line classification for PokerStars tournament hand histories.
//!
//! Every line of a block is matched against an ordered list of [`Rule`]s and
//! the first rule that recognizes it wins. The generic action rule
//! (`word: ...`) must run after the header/table/seat rules, so the order in
//! [`PRECEDENCE`] is part of the contract.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

const HEADER_PREFIX: &str = "PokerStars Hand #";
const DEALT_PREFIX: &str = "Dealt to ";
const FLOP_MARKER: &str = "*** FLOP ***";
const TURN_MARKER: &str = "*** TURN ***";
const RIVER_MARKER: &str = "*** RIVER ***";
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

static HAND_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Hand #(\d+)").unwrap());
static TOURNAMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tournament #(\d+)").unwrap());
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (\d+/\d+/\d+ \d+:\d+:\d+)").unwrap());
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Table '([^']+)'").unwrap());
static BUTTON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Seat #(\d+) is the button").unwrap());
static SEAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Seat (\d+): ([^(]+) \((\d+) in chips(?:, [€$£]?([\d.]+) bounty)?\)").unwrap()
});
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+): (.*)$").unwrap());
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// What a single line contributed to its hand.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// `PokerStars Hand #...` - each field is `None` when its sub-pattern fails
    Header {
        hand_id: Option<String>,
        tournament_id: Option<String>,
        date: Option<NaiveDateTime>,
    },
    /// `Table 'name' ...`, optionally carrying `Seat #N is the button`
    Table {
        name: String,
        button_seat: Option<u32>,
    },
    /// `Seat #N is the button` on a line of its own
    ButtonSeat(u32),
    /// `Seat N: name (chips in chips[, bounty])`
    Seat {
        seat: u32,
        name: String,
        chips: u64,
        bounty: f64,
    },
    /// `actor: description`
    Action { player: String, action: String },
    /// `Dealt to <tracked player> [cards]`
    HoleCards { cards: String },
    Flop(Vec<String>),
    Turn(String),
    River(String),
}

impl LineKind {
    /// The rule that produces this kind of line.
    pub fn rule(&self) -> Rule {
        match self {
            LineKind::Header { .. } => Rule::Header,
            LineKind::Table { .. } => Rule::Table,
            LineKind::ButtonSeat(_) => Rule::ButtonSeat,
            LineKind::Seat { .. } => Rule::Seat,
            LineKind::Action { .. } => Rule::Action,
            LineKind::HoleCards { .. } => Rule::HoleCards,
            LineKind::Flop(_) | LineKind::Turn(_) | LineKind::River(_) => Rule::Board,
        }
    }
}

/// One line recognizer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Rule {
    Header,
    Table,
    ButtonSeat,
    Seat,
    Action,
    HoleCards,
    Board,
}

/// Order in which rules are tried. First match wins.
pub const PRECEDENCE: [Rule; 7] = [
    Rule::Header,
    Rule::Table,
    Rule::ButtonSeat,
    Rule::Seat,
    Rule::Action,
    Rule::HoleCards,
    Rule::Board,
];

impl Rule {
    /// Try this rule alone against `line`.
    pub fn apply(self, line: &str, tracked_player: &str) -> Option<LineKind> {
        match self {
            Rule::Header => header(line),
            Rule::Table => table(line),
            Rule::ButtonSeat => button_seat(line),
            Rule::Seat => seat(line),
            Rule::Action => action(line),
            Rule::HoleCards => hole_cards(line, tracked_player),
            Rule::Board => board(line),
        }
    }
}

/// Classify a trimmed line. `None` means no rule recognized it.
///
/// ```
/// use handparse_engine::line::{classify, LineKind};
///
/// let kind = classify("Seat #2 is the button", "Alice");
/// assert_eq!(kind, Some(LineKind::ButtonSeat(2)));
/// assert_eq!(classify("*** HOLE CARDS ***", "Alice"), None);
/// ```
pub fn classify(line: &str, tracked_player: &str) -> Option<LineKind> {
    PRECEDENCE
        .iter()
        .find_map(|rule| rule.apply(line, tracked_player))
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn header(line: &str) -> Option<LineKind> {
    if !line.starts_with(HEADER_PREFIX) {
        return None;
    }
    let hand_id = capture(&HAND_ID_RE, line).map(str::to_string);
    let tournament_id = capture(&TOURNAMENT_RE, line).map(str::to_string);
    let date = capture(&DATE_RE, line).and_then(|s| {
        NaiveDateTime::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| tracing::warn!(date = s, error = %e, "unparseable hand date"))
            .ok()
    });
    if hand_id.is_none() || tournament_id.is_none() || date.is_none() {
        tracing::warn!(line, "incomplete hand header");
    }
    Some(LineKind::Header {
        hand_id,
        tournament_id,
        date,
    })
}

fn table(line: &str) -> Option<LineKind> {
    let name = capture(&TABLE_RE, line)?;
    let button_seat = capture(&BUTTON_RE, line).and_then(|s| s.parse().ok());
    Some(LineKind::Table {
        name: name.to_string(),
        button_seat,
    })
}

fn button_seat(line: &str) -> Option<LineKind> {
    if !line.starts_with("Seat #") {
        return None;
    }
    match capture(&BUTTON_RE, line)?.parse() {
        Ok(seat) => Some(LineKind::ButtonSeat(seat)),
        Err(e) => {
            tracing::warn!(line, error = %e, "button seat out of range");
            None
        }
    }
}

fn seat(line: &str) -> Option<LineKind> {
    let caps = SEAT_RE.captures(line)?;
    let parsed = (|| {
        let seat = caps[1].parse::<u32>().ok()?;
        let chips = caps[3].parse::<u64>().ok()?;
        let bounty = match caps.get(4) {
            Some(m) => m.as_str().parse::<f64>().ok()?,
            None => 0.0,
        };
        Some((seat, chips, bounty))
    })();
    match parsed {
        Some((seat, chips, bounty)) => Some(LineKind::Seat {
            seat,
            name: caps[2].trim().to_string(),
            chips,
            bounty,
        }),
        None => {
            tracing::warn!(line, "skipping seat line with unreadable numbers");
            None
        }
    }
}

fn action(line: &str) -> Option<LineKind> {
    let caps = ACTION_RE.captures(line)?;
    Some(LineKind::Action {
        player: caps[1].to_string(),
        action: caps[2].to_string(),
    })
}

fn hole_cards(line: &str, tracked_player: &str) -> Option<LineKind> {
    if tracked_player.is_empty() {
        return None;
    }
    let rest = line
        .strip_prefix(DEALT_PREFIX)?
        .strip_prefix(tracked_player)?
        .strip_prefix(" [")?;
    let end = rest.find(']')?;
    let cards = rest[..end].trim();
    if cards.is_empty() {
        return None;
    }
    Some(LineKind::HoleCards {
        cards: cards.to_string(),
    })
}

fn board(line: &str) -> Option<LineKind> {
    if line.starts_with(FLOP_MARKER) {
        let cards = capture(&BRACKET_RE, line)?;
        return Some(LineKind::Flop(
            cards.split_whitespace().map(str::to_string).collect(),
        ));
    }
    // Real logs repeat the earlier board before the new card: `[Ah Kd Qc] [Jc]`
    let last_group = || {
        BRACKET_RE
            .captures_iter(line)
            .last()
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    };
    if line.starts_with(TURN_MARKER) {
        return last_group().map(LineKind::Turn);
    }
    if line.starts_with(RIVER_MARKER) {
        return last_group().map(LineKind::River);
    }
    None
}
