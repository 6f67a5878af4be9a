//! Chapter command: offline range table lookup.

use std::io::{self, Write};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use icdwiki::{ParsedCode, ResolverConfig, log};

pub fn run_chapter(codes: &[String], config: &ResolverConfig) -> Result<()> {
    let table = config
        .code_space_table()
        .context("failed to load code space table")?;

    let mut out = io::stdout().lock();
    let mut malformed = 0;
    for code in codes {
        let parsed = match ParsedCode::parse(code) {
            Ok(parsed) => parsed,
            Err(err) => {
                log!("error"; "{}", err);
                malformed += 1;
                continue;
            }
        };

        let segments = parsed.segments();
        let chapter = table.chapter_for(&parsed).unwrap_or("-");
        let code = format!("{:<10}", parsed.raw());
        writeln!(
            out,
            "{} {:<6} {} {} {}",
            code.if_supports_color(Stream::Stdout, |c| c.bold()),
            chapter,
            segments.category,
            segments.detail.if_supports_color(Stream::Stdout, |d| d.dimmed()),
            segments.extension.if_supports_color(Stream::Stdout, |e| e.dimmed())
        )?;
    }
    out.flush()?;

    anyhow::ensure!(malformed == 0, "{} malformed codes", malformed);
    Ok(())
}
