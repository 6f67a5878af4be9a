//! Code space table: ICD-10 code ranges mapped to chapter labels.
//!
//! # Format
//!
//! ```json
//! { "codeSpaces": [ { "codeSpace": "A00-B99", "chapter": "I" } ] }
//! ```
//!
//! `wikipediaChapter` is accepted as an alias of `chapter`.
//!
//! # Matching
//!
//! Entries are checked in file order, the first match wins.
//!
//! - Single-letter range (`K00-K93`): the code letter must equal it and the
//!   number must lie within `start..=end`.
//! - Two-letter range (`V01-Y98`): a code with the start letter matches from
//!   `start` up to [`MAX_CATEGORY`], a code with the end letter matches from
//!   0 up to `end`. Letters strictly between the two never match.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use super::{CodeParseError, ParsedCode};

/// Highest two-digit category number, the open end of a two-letter range.
pub const MAX_CATEGORY: u32 = 99;

/// Table bundled with the crate.
const EMBEDDED_TABLE: &str = include_str!("../../resources/code_spaces.json");

/// Errors raised while loading a code space table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("code space table is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("invalid code space `{0}` (expected a range like `A00-B99`)")]
    InvalidCodeSpace(String),

    #[error("code space table has no entries")]
    Empty,
}

// ============================================================================
// CodeSpaceEntry
// ============================================================================

/// One `start-end → chapter` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpaceEntry {
    pub start_letter: char,
    pub start_number: u32,
    pub end_letter: char,
    pub end_number: u32,
    pub chapter: String,
}

impl CodeSpaceEntry {
    /// Parse a `A00-B99` style range.
    pub fn parse(code_space: &str, chapter: impl Into<String>) -> Result<Self, TableError> {
        static RE_RANGE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^([A-Z])([0-9]+) *- *([A-Z])([0-9]+)$").unwrap());

        let invalid = || TableError::InvalidCodeSpace(code_space.to_string());
        let upper = code_space.trim().to_uppercase();
        let caps = RE_RANGE.captures(&upper).ok_or_else(invalid)?;

        let letter = |i: usize| caps[i].chars().next().ok_or_else(invalid);
        let number = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());

        Ok(Self {
            start_letter: letter(1)?,
            start_number: number(2)?,
            end_letter: letter(3)?,
            end_number: number(4)?,
            chapter: chapter.into(),
        })
    }

    /// Whether `code` falls inside this range.
    pub fn matches(&self, code: &ParsedCode) -> bool {
        let (letter, n) = (code.letter(), code.number());

        if self.start_letter == self.end_letter {
            return letter == self.start_letter && (self.start_number..=self.end_number).contains(&n);
        }

        if letter == self.start_letter {
            (self.start_number..=MAX_CATEGORY).contains(&n)
        } else if letter == self.end_letter {
            n <= self.end_number
        } else {
            false
        }
    }
}

impl fmt::Display for CodeSpaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:02}-{}{:02}",
            self.start_letter, self.start_number, self.end_letter, self.end_number
        )
    }
}

// ============================================================================
// RangeTable
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    code_spaces: Vec<RawEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    code_space: String,
    #[serde(alias = "wikipediaChapter")]
    chapter: String,
}

/// Ordered, immutable list of code spaces.
#[derive(Debug, Clone)]
pub struct RangeTable {
    entries: Vec<CodeSpaceEntry>,
}

impl RangeTable {
    pub fn new(entries: Vec<CodeSpaceEntry>) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { entries })
    }

    /// The ICD-10 chapter table shipped with the crate.
    pub fn embedded() -> Result<Self, TableError> {
        Self::from_json(EMBEDDED_TABLE)
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        let entries = raw
            .code_spaces
            .into_iter()
            .map(|e| CodeSpaceEntry::parse(&e.code_space, e.chapter))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(entries)
    }

    pub fn from_path(path: &Path) -> Result<Self, TableError> {
        let content =
            fs::read_to_string(path).map_err(|err| TableError::Io(path.to_path_buf(), err))?;
        Self::from_json(&content)
    }

    /// Chapter label of the first entry covering `code`.
    pub fn chapter_for(&self, code: &ParsedCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.matches(code))
            .map(|entry| entry.chapter.as_str())
    }

    /// Parse `code` and look up its chapter.
    ///
    /// `Err` means the input is malformed, `Ok(None)` that no entry covers it.
    pub fn resolve_chapter(&self, code: &str) -> Result<Option<&str>, CodeParseError> {
        let parsed = ParsedCode::parse(code)?;
        Ok(self.chapter_for(&parsed))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn table(rows: &[(&str, &str)]) -> RangeTable {
        let entries = rows
            .iter()
            .map(|(space, chapter)| CodeSpaceEntry::parse(space, *chapter).unwrap())
            .collect();
        RangeTable::new(entries).unwrap()
    }

    fn chapter<'a>(table: &'a RangeTable, code: &str) -> Option<&'a str> {
        table.resolve_chapter(code).unwrap()
    }

    #[test]
    fn test_entry_parse() {
        let entry = CodeSpaceEntry::parse("v01-Y98", "XX").unwrap();
        assert_eq!(entry.start_letter, 'V');
        assert_eq!(entry.start_number, 1);
        assert_eq!(entry.end_letter, 'Y');
        assert_eq!(entry.end_number, 98);
        assert_eq!(entry.to_string(), "V01-Y98");
    }

    #[test]
    fn test_entry_parse_invalid() {
        for bad in ["A00", "A00-", "00-B99", "A00:B99", ""] {
            assert!(
                matches!(
                    CodeSpaceEntry::parse(bad, "I"),
                    Err(TableError::InvalidCodeSpace(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_single_letter_bounds() {
        let t = table(&[("K20-K31", "XI")]);
        assert_eq!(chapter(&t, "K20"), Some("XI"));
        assert_eq!(chapter(&t, "K25.1"), Some("XI"));
        assert_eq!(chapter(&t, "K31"), Some("XI"));
        assert_eq!(chapter(&t, "K19"), None);
        assert_eq!(chapter(&t, "K32"), None);
        assert_eq!(chapter(&t, "J25"), None);
    }

    #[test]
    fn test_two_letter_range_edges() {
        let t = table(&[("S10-T50", "XIX")]);
        // start letter: bounded below by start, above by 99
        assert_eq!(chapter(&t, "S10"), Some("XIX"));
        assert_eq!(chapter(&t, "S99"), Some("XIX"));
        assert_eq!(chapter(&t, "S09"), None);
        assert_eq!(chapter(&t, "S100"), None);
        // end letter: bounded above by end only
        assert_eq!(chapter(&t, "T00"), Some("XIX"));
        assert_eq!(chapter(&t, "T50"), Some("XIX"));
        assert_eq!(chapter(&t, "T51"), None);
    }

    #[test]
    fn test_two_letter_range_skips_middle_letters() {
        let t = table(&[("V01-Y98", "XX")]);
        assert_eq!(chapter(&t, "V01"), Some("XX"));
        assert_eq!(chapter(&t, "Y98"), Some("XX"));
        assert_eq!(chapter(&t, "W10"), None);
        assert_eq!(chapter(&t, "X59"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let t = table(&[("E00-E50", "first"), ("E10-E90", "second")]);
        assert_eq!(chapter(&t, "E10.3"), Some("first"));
        assert_eq!(chapter(&t, "E60"), Some("second"));

        let t = table(&[("E10-E90", "second"), ("E00-E50", "first")]);
        assert_eq!(chapter(&t, "E10.3"), Some("second"));
    }

    #[test]
    fn test_malformed_is_not_not_found() {
        let t = table(&[("A00-B99", "I")]);
        assert!(t.resolve_chapter("??").is_err());
        assert_eq!(t.resolve_chapter("C00").unwrap(), None);
    }

    #[test]
    fn test_embedded_table() {
        let t = RangeTable::embedded().unwrap();
        assert_eq!(t.len(), 22);
        assert_eq!(chapter(&t, "A15"), Some("I"));
        assert_eq!(chapter(&t, "B99"), Some("I"));
        assert_eq!(chapter(&t, "D48"), Some("II"));
        assert_eq!(chapter(&t, "D51.9"), Some("III"));
        assert_eq!(chapter(&t, "E10.3"), Some("IV"));
        assert_eq!(chapter(&t, "H60"), Some("VIII"));
        assert_eq!(chapter(&t, "L10.0"), Some("XII"));
        assert_eq!(chapter(&t, "M07"), Some("XIII"));
        assert_eq!(chapter(&t, "P14.1"), Some("XVI"));
        assert_eq!(chapter(&t, "T98"), Some("XIX"));
        assert_eq!(chapter(&t, "ZZ100"), None);
    }

    #[test]
    fn test_from_json_alias_and_errors() {
        let t = RangeTable::from_json(
            r#"{"codeSpaces":[{"codeSpace":"A00-B99","wikipediaChapter":"I"}]}"#,
        )
        .unwrap();
        assert_eq!(chapter(&t, "B20"), Some("I"));

        assert!(matches!(
            RangeTable::from_json("{"),
            Err(TableError::Json(_))
        ));
        assert!(matches!(
            RangeTable::from_json(r#"{"codeSpaces":[]}"#),
            Err(TableError::Empty)
        ));
        assert!(matches!(
            RangeTable::from_json(r#"{"codeSpaces":[{"codeSpace":"A-B","chapter":"I"}]}"#),
            Err(TableError::InvalidCodeSpace(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"codeSpaces":[{{"codeSpace":"F00-F99","chapter":"V"}}]}}"#
        )
        .unwrap();
        let t = RangeTable::from_path(file.path()).unwrap();
        assert_eq!(chapter(&t, "F32"), Some("V"));

        let missing = RangeTable::from_path(Path::new("/nonexistent/code_spaces.json"));
        assert!(matches!(missing, Err(TableError::Io(..))));
    }
}
