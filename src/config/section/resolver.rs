//! `[resolver]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [resolver]
//! cache_capacity = 4                                 # Chapter pages kept in memory
//! code_spaces = "code_spaces.json"                   # Omit to use the bundled table
//! search_template = "Chapter {} of ICD-10 deals with"
//! index_title = "ICD-10"                             # Never scanned for diseases
//! ```
//!
//! `code_spaces` is resolved relative to the config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;

/// Placeholder replaced by the chapter label in `search_template`.
pub const CHAPTER_PLACEHOLDER: &str = "{}";

/// Code resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverSectionConfig {
    /// Maximum number of chapter pages cached.
    pub cache_capacity: usize,

    /// Custom code space table (JSON).
    pub code_spaces: Option<PathBuf>,

    /// Title search phrase for a chapter, `{}` is the chapter label.
    pub search_template: String,

    /// Title of the generic ICD-10 index article.
    pub index_title: String,
}

impl Default for ResolverSectionConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            code_spaces: None,
            search_template: "Chapter {} of ICD-10 deals with".to_string(),
            index_title: "ICD-10".to_string(),
        }
    }
}

impl ResolverSectionConfig {
    /// Search phrase for `chapter`.
    pub fn chapter_query(&self, chapter: &str) -> String {
        self.search_template.replacen(CHAPTER_PLACEHOLDER, chapter, 1)
    }
}
