//! Configuration section definitions.
//!
//! Each module corresponds to a section in `icdwiki.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `wiki`     | `[wiki]`       | Content API endpoint and transport   |
//! | `resolver` | `[resolver]`   | Cache, code space table, search text |

mod resolver;
mod wiki;

pub use resolver::{CHAPTER_PLACEHOLDER, ResolverSectionConfig};
pub use wiki::WikiConfig;
