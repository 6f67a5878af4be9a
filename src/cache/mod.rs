//! In-memory cache for fetched chapter pages.

mod article;

pub use article::{ArticleCache, DEFAULT_CAPACITY};
