//! Command-line interface module.

mod args;
pub mod chapter;
pub mod resolve;
pub mod scan;

pub use args::{Cli, Commands, ResolveArgs};
