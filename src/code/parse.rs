//! ICD-10 code parsing.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Errors produced when an input string is not an ICD-10 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    #[error("`{0}` is not an ICD-10 code (expected a letter followed by digits)")]
    Malformed(String),

    #[error("category number in `{0}` is out of range")]
    Number(String),
}

/// A code reduced to its letter and primary category number.
///
/// `E10.3` parses to letter `E`, number `10`. The raw code is kept upper-cased
/// and trimmed, it is what the markup scanner looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCode {
    letter: char,
    number: u32,
    raw: String,
}

impl ParsedCode {
    /// Extract the first letter that is immediately followed by digits.
    ///
    /// Matching is case-insensitive. The match does not have to start at the
    /// beginning of the input: `ZZ100` parses as `Z` / `100`.
    pub fn parse(code: &str) -> Result<Self, CodeParseError> {
        static RE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z])([0-9]+)").unwrap());

        let raw = code.trim().to_uppercase();
        let caps = RE_CODE
            .captures(&raw)
            .ok_or_else(|| CodeParseError::Malformed(code.to_string()))?;

        let letter = caps[1]
            .chars()
            .next()
            .ok_or_else(|| CodeParseError::Malformed(code.to_string()))?;
        let number = caps[2]
            .parse()
            .map_err(|_| CodeParseError::Number(code.to_string()))?;

        Ok(Self {
            letter,
            number,
            raw,
        })
    }

    #[inline]
    pub fn letter(&self) -> char {
        self.letter
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Upper-cased, trimmed input.
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Split into category, detail and extension fragments.
    ///
    /// Missing fragments are empty strings: `E10.3` gives `("E10", "3", "")`,
    /// `M07` gives `("M07", "", "")`.
    pub fn segments(&self) -> CodeSegments<'_> {
        let mut parts = self.raw.splitn(3, '.');
        CodeSegments {
            category: parts.next().unwrap_or_default(),
            detail: parts.next().unwrap_or_default(),
            extension: parts.next().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ParsedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Dot-separated fragments of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSegments<'a> {
    pub category: &'a str,
    pub detail: &'a str,
    pub extension: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let code = ParsedCode::parse("E10.3").unwrap();
        assert_eq!(code.letter(), 'E');
        assert_eq!(code.number(), 10);
        assert_eq!(code.raw(), "E10.3");
    }

    #[test]
    fn test_parse_lowercase_and_whitespace() {
        let code = ParsedCode::parse("  l20.9 ").unwrap();
        assert_eq!(code.letter(), 'L');
        assert_eq!(code.number(), 20);
        assert_eq!(code.raw(), "L20.9");
    }

    #[test]
    fn test_parse_without_detail() {
        let code = ParsedCode::parse("M07").unwrap();
        assert_eq!(code.number(), 7);
    }

    #[test]
    fn test_parse_skips_leading_letters() {
        let code = ParsedCode::parse("ZZ100").unwrap();
        assert_eq!(code.letter(), 'Z');
        assert_eq!(code.number(), 100);
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(
            ParsedCode::parse("123"),
            Err(CodeParseError::Malformed("123".to_string()))
        );
        assert!(matches!(
            ParsedCode::parse(""),
            Err(CodeParseError::Malformed(_))
        ));
        assert!(matches!(
            ParsedCode::parse("E."),
            Err(CodeParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_number_overflow() {
        assert!(matches!(
            ParsedCode::parse("A99999999999"),
            Err(CodeParseError::Number(_))
        ));
    }

    #[test]
    fn test_segments() {
        let code = ParsedCode::parse("e10.3").unwrap();
        let seg = code.segments();
        assert_eq!(seg.category, "E10");
        assert_eq!(seg.detail, "3");
        assert_eq!(seg.extension, "");

        let code = ParsedCode::parse("S72.0.1").unwrap();
        let seg = code.segments();
        assert_eq!((seg.category, seg.detail, seg.extension), ("S72", "0", "1"));

        let code = ParsedCode::parse("M07").unwrap();
        assert_eq!(code.segments().detail, "");
    }
}
