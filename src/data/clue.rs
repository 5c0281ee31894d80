//! Clue data shared by every carousel.
//!
//! `Clues` is the read-only source the widgets borrow from. It is built once
//! per puzzle load and shared behind an `Arc`; a reload produces a brand new
//! `Arc` rather than mutating the old one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Axis of a crossword entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Across, Direction::Down];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "across" => Ok(Direction::Across),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}

/// One clue plus its solve status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueRecord {
    pub number: u32,
    pub clue: String,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub correct: bool,
}

impl ClueRecord {
    pub fn new(number: u32, clue: impl Into<String>) -> Self {
        Self {
            number,
            clue: clue.into(),
            complete: false,
            correct: false,
        }
    }

    pub fn with_status(mut self, complete: bool, correct: bool) -> Self {
        self.complete = complete;
        self.correct = correct;
        self
    }
}

/// Direction → ordered clue sequence
///
/// A direction that was never inserted is "absent"; one inserted with an
/// empty vector is "empty". Callers treat both the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clues {
    by_direction: HashMap<Direction, Vec<ClueRecord>>,
}

/// Handle passed to widgets; cloning shares the same snapshot
pub type SharedClues = Arc<Clues>;

impl Clues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous sequence for `direction`
    pub fn with_sequence(mut self, direction: Direction, clues: Vec<ClueRecord>) -> Self {
        self.insert(direction, clues);
        self
    }

    pub fn insert(&mut self, direction: Direction, clues: Vec<ClueRecord>) {
        self.by_direction.insert(direction, clues);
    }

    /// Sequence for a direction, `None` when absent
    pub fn get(&self, direction: Direction) -> Option<&[ClueRecord]> {
        self.by_direction.get(&direction).map(Vec::as_slice)
    }

    /// Length of a direction's sequence (0 when absent)
    pub fn len(&self, direction: Direction) -> usize {
        self.get(direction).map_or(0, <[ClueRecord]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.by_direction.values().all(Vec::is_empty)
    }

    pub fn total(&self) -> usize {
        self.by_direction.values().map(Vec::len).sum()
    }

    pub fn into_shared(self) -> SharedClues {
        Arc::new(self)
    }
}
