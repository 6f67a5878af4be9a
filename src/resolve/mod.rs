//! ICD-10 code resolution.
//!
//! ```text
//! code ─► RangeTable ─► chapter label
//!      ─► search ─► chapter title ─► ArticleCache / page_html ─► markup
//!      ─► scanner ─► disease link ─► search ─► canonical title
//!      ─► language links ─► [LanguageVariant]
//! ```

mod batch;
mod error;
#[cfg(test)]
mod fake;
mod resolver;
mod variant;

pub use batch::{BatchReport, FailedCode, Resolution};
pub use error::{ResolveError, SetupError};
pub use resolver::CodeResolver;
pub use variant::LanguageVariant;
