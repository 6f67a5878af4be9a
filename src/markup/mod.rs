//! Article markup: parsing into an owned tree and searching it.
//!
//! - `tree` - `Document`/`Element` built from `tl`
//! - `entity` - character reference decoding
//! - `scan` - disease entry lookup in chapter articles

mod entity;
mod scan;
mod tree;

pub use entity::unescape;
pub use scan::{DiseaseLink, TOC_ID, find_disease, find_in_document};
pub use tree::{Document, Element, MarkupError, Node};
