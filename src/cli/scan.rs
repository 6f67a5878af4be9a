//! Scan command: run the disease scanner over a saved chapter page.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use icdwiki::markup::{Document, find_in_document};
use icdwiki::{ParsedCode, log};

pub fn run_scan(file: &Path, code: &str) -> Result<()> {
    let parsed = ParsedCode::parse(code)?;
    let html = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let doc = Document::parse(&html).with_context(|| format!("failed to parse {}", file.display()))?;

    if let Some(title) = doc.title() {
        log!("scan"; "{}", title.trim());
    }

    match find_in_document(&doc, parsed.raw()) {
        Some(link) => println!("{}", serde_json::to_string_pretty(&link)?),
        None => log!("scan"; "no entry for {}", parsed),
    }
    Ok(())
}
