//! ICD-10 codes and the code space → chapter table.
//!
//! - `parse` - `ParsedCode` extraction and dot-separated segments
//! - `table` - `RangeTable`, first-match range lookup

mod parse;
mod table;

pub use parse::{CodeParseError, CodeSegments, ParsedCode};
pub use table::{CodeSpaceEntry, MAX_CATEGORY, RangeTable, TableError};
