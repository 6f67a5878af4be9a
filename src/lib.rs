//! Resolve ICD-10 codes to encyclopedia articles in several languages.
//!
//! A code is mapped to its chapter through a static range table, the chapter
//! article is found by title search and scanned for the code's entry, and the
//! entry's article is expanded into language variants through the wiki's
//! language links.
//!
//! ```ignore
//! let config = ResolverConfig::load(None)?;
//! let resolver = CodeResolver::from_config(&config)?;
//! for variant in resolver.resolve("E10.3", &["pl", "de"])? {
//!     println!("{} {} {}", variant.language, variant.title, variant.url);
//! }
//! ```

pub mod logger;

pub mod cache;
pub mod code;
pub mod config;
pub mod markup;
pub mod resolve;
pub mod wiki;

pub use cache::ArticleCache;
pub use code::{CodeParseError, ParsedCode, RangeTable, TableError};
pub use config::{ConfigError, ResolverConfig};
pub use markup::{DiseaseLink, find_disease};
pub use resolve::{
    BatchReport, CodeResolver, LanguageVariant, Resolution, ResolveError, SetupError,
};
pub use wiki::{ClientError, ContentClient, LanguageLink, WikiClient};
