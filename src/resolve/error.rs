//! Resolution error types.

use thiserror::Error;

use crate::code::{CodeParseError, TableError};
use crate::markup::MarkupError;
use crate::wiki::ClientError;

/// Failure of a single `resolve` call.
///
/// "No article for this code" is not an error, it is an empty result.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Parse(#[from] CodeParseError),

    #[error("content API request failed")]
    Client(#[from] ClientError),

    #[error("chapter page could not be read")]
    Markup(#[from] MarkupError),

    #[error("chapter search landed on the index page `{0}`")]
    IndexPage(String),
}

impl ResolveError {
    /// Whether the input itself was at fault, as opposed to the content source.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Failure to construct a resolver.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to load code space table")]
    Table(#[from] TableError),

    #[error("failed to create content client")]
    Client(#[from] ClientError),
}
