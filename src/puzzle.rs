//! Puzzle file loader.
//!
//! Reads crossword data in the `{ "across": { "1": {...} }, "down": {...} }`
//! JSON shape and turns it into the `Clues` source the carousels share.
//! Sample puzzles are embedded at compile time so the binary runs without any
//! files on disk.

use crate::data::{ClueRecord, Clues, Direction};
use anyhow::{bail, Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

// Embed entire directory - automatically includes all sample puzzles
static PUZZLES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults/puzzles");

/// Sample used when neither --puzzle nor --sample is given
pub const DEFAULT_SAMPLE: &str = "sample";

/// One grid entry as stored in the puzzle file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleEntry {
    pub clue: String,
    pub answer: String,
    #[serde(default)]
    pub row: u32,
    #[serde(default)]
    pub col: u32,
    /// Letters entered so far; blank cells are ' ' or '_'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guess: Option<String>,
}

impl PuzzleEntry {
    /// Every cell of the answer has a letter in it
    pub fn is_complete(&self) -> bool {
        match &self.guess {
            Some(guess) => {
                guess.chars().count() == self.answer.chars().count()
                    && guess.chars().all(|c| !c.is_whitespace() && c != '_')
            }
            None => false,
        }
    }

    /// Complete, and the letters match the answer ignoring case
    pub fn is_correct(&self) -> bool {
        self.is_complete()
            && self.guess.as_deref().is_some_and(|guess| {
                guess
                    .chars()
                    .zip(self.answer.chars())
                    .all(|(g, a)| g.to_lowercase().eq(a.to_lowercase()))
            })
    }
}

/// Whole puzzle. A direction missing from the file stays absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub across: Option<BTreeMap<String, PuzzleEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down: Option<BTreeMap<String, PuzzleEntry>>,
}

impl Puzzle {
    pub fn from_json(contents: &str) -> Result<Self> {
        let puzzle: Puzzle = serde_json::from_str(contents).context("Failed to parse puzzle JSON")?;
        // Surface bad clue numbers at load time rather than at display time
        puzzle.to_clues()?;
        Ok(puzzle)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle file {:?}", path))?;
        Self::from_json(&contents).with_context(|| format!("Invalid puzzle file {:?}", path))
    }

    /// Load one of the embedded sample puzzles by file stem
    pub fn sample(name: &str) -> Result<Self> {
        let file_name = format!("{}.json", name);
        let Some(file) = PUZZLES_DIR.get_file(&file_name) else {
            bail!(
                "Unknown sample puzzle '{}' (available: {})",
                name,
                Self::sample_names().join(", ")
            );
        };
        let contents = file
            .contents_utf8()
            .with_context(|| format!("Sample puzzle '{}' is not UTF-8", name))?;
        Self::from_json(contents).with_context(|| format!("Invalid sample puzzle '{}'", name))
    }

    /// Names accepted by `sample`
    pub fn sample_names() -> Vec<String> {
        let mut names: Vec<String> = PUZZLES_DIR
            .files()
            .filter(|f| f.path().extension().is_some_and(|ext| ext == "json"))
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn entries(&self, direction: Direction) -> Option<&BTreeMap<String, PuzzleEntry>> {
        match direction {
            Direction::Across => self.across.as_ref(),
            Direction::Down => self.down.as_ref(),
        }
    }

    /// Build the clue source, ordered by clue number within each direction
    pub fn to_clues(&self) -> Result<Clues> {
        let mut clues = Clues::new();
        for direction in Direction::ALL {
            let Some(entries) = self.entries(direction) else {
                continue;
            };

            let mut records = Vec::with_capacity(entries.len());
            let mut seen = HashSet::with_capacity(entries.len());
            for (key, entry) in entries {
                let number: u32 = key
                    .trim()
                    .parse()
                    .with_context(|| format!("Clue key '{}' in {} is not a number", key, direction))?;
                // "1", "01" and " 1" are distinct keys but the same clue
                if !seen.insert(number) {
                    bail!("Duplicate clue number {} in {} (key '{}')", number, direction, key);
                }
                records.push(
                    ClueRecord::new(number, entry.clue.clone())
                        .with_status(entry.is_complete(), entry.is_correct()),
                );
            }
            // BTreeMap orders keys as strings ("10" < "2"), so sort numerically
            records.sort_by_key(|r| r.number);
            clues.insert(direction, records);
        }
        Ok(clues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "across": {
            "10": { "clue": "Tenth", "answer": "TEN", "row": 2, "col": 0 },
            "2": { "clue": "Second", "answer": "TWO", "row": 0, "col": 1, "guess": "two" },
            "1": { "clue": "First", "answer": "ONE", "row": 0, "col": 0, "guess": "ONA" }
        },
        "down": {
            "3": { "clue": "Partial", "answer": "PAR", "guess": "P_R" }
        }
    }"#;

    #[test]
    fn test_sorts_numerically_and_derives_status() {
        let clues = Puzzle::from_json(SMALL).unwrap().to_clues().unwrap();
        let across = clues.get(Direction::Across).unwrap();

        assert_eq!(across.iter().map(|c| c.number).collect::<Vec<_>>(), vec![1, 2, 10]);
        assert!(across[0].complete && !across[0].correct);
        assert!(across[1].complete && across[1].correct);
        assert!(!across[2].complete && !across[2].correct);

        let down = clues.get(Direction::Down).unwrap();
        assert_eq!(down.len(), 1);
        assert!(!down[0].complete);
    }

    #[test]
    fn test_missing_direction_stays_absent() {
        let puzzle = Puzzle::from_json(r#"{ "across": { "1": { "clue": "A", "answer": "AB" } } }"#).unwrap();
        let clues = puzzle.to_clues().unwrap();
        assert!(clues.get(Direction::Down).is_none());
        assert_eq!(clues.len(Direction::Across), 1);
    }

    #[test]
    fn test_rejects_non_numeric_keys() {
        let err = Puzzle::from_json(r#"{ "down": { "x": { "clue": "A", "answer": "AB" } } }"#).unwrap_err();
        assert!(format!("{:#}", err).contains("not a number"));
    }

    #[test]
    fn test_rejects_duplicate_clue_numbers() {
        let json = r#"{ "across": {
            "1": { "clue": "A", "answer": "AB" },
            "01": { "clue": "B", "answer": "BC" }
        } }"#;
        let err = Puzzle::from_json(json).unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate clue number 1 in across"));

        // Same number in different directions is fine
        let json = r#"{
            "across": { "1": { "clue": "A", "answer": "AB" } },
            "down": { "1": { "clue": "B", "answer": "BC" } }
        }"#;
        assert!(Puzzle::from_json(json).is_ok());
    }

    #[test]
    fn test_short_guess_is_not_complete() {
        let entry = PuzzleEntry {
            clue: "Clue".to_string(),
            answer: "WORD".to_string(),
            row: 0,
            col: 0,
            guess: Some("WOR".to_string()),
        };
        assert!(!entry.is_complete());
        assert!(!entry.is_correct());
    }

    #[test]
    fn test_embedded_sample_loads() {
        assert!(Puzzle::sample_names().contains(&DEFAULT_SAMPLE.to_string()));
        let clues = Puzzle::sample(DEFAULT_SAMPLE).unwrap().to_clues().unwrap();
        assert!(clues.len(Direction::Across) > 0);
        assert!(clues.len(Direction::Down) > 0);
        assert!(Puzzle::sample("no-such-puzzle").is_err());
    }
}
