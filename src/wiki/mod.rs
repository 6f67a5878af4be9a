//! Encyclopedia content access.
//!
//! [`ContentClient`] is the seam between resolution and the network.
//! [`WikiClient`] implements it against the MediaWiki action API; tests
//! substitute an in-memory client.

mod client;
mod error;
mod response;

pub use client::WikiClient;
pub use error::ClientError;
pub use response::LanguageLink;

/// Read-only access to a wiki in the primary language.
pub trait ContentClient {
    /// Title of the best full-text search hit for `query`.
    fn search_title(&self, query: &str) -> Result<Option<String>, ClientError>;

    /// Counterpart of `title` in `language`, if the page links one.
    fn language_link(&self, title: &str, language: &str)
    -> Result<Option<LanguageLink>, ClientError>;

    /// Rendered HTML body of `title`, following redirects.
    fn page_html(&self, title: &str) -> Result<String, ClientError>;
}
