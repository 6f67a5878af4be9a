//! Resolve command implementation.
//!
//! Resolves every code in parallel against the live wiki, then prints the
//! variants in input order followed by a summary of what was not found.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::cli::ResolveArgs;
use icdwiki::logger::ProgressLine;
use icdwiki::{BatchReport, CodeResolver, LanguageVariant, Resolution, ResolverConfig, log};

/// JSON shape of one code's result.
#[derive(Debug, Serialize)]
struct CodeOutput<'a> {
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variants: Option<&'a [LanguageVariant]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutput<'a> {
    results: Vec<CodeOutput<'a>>,
    report: &'a BatchReport,
}

/// Execute resolve command
pub fn run_resolve(args: &ResolveArgs, config: &ResolverConfig) -> Result<()> {
    let resolver =
        CodeResolver::from_config(config).context("failed to initialize resolver")?;

    let results = if args.codes.len() > 1 {
        let progress = ProgressLine::new("resolve", args.codes.len());
        let results = resolver.resolve_batch_with(&args.codes, &args.languages, |_| progress.inc());
        progress.finish();
        results
    } else {
        resolver.resolve_batch(&args.codes, &args.languages)
    };
    let report = BatchReport::from_resolutions(&results);

    let mut out = io::stdout().lock();
    if args.json {
        write_json(&mut out, &results, &report)?;
    } else {
        write_table(&mut out, &results)?;
    }
    out.flush()?;

    log_summary(&report);
    if !report.failed.is_empty() {
        bail!("{} of {} codes failed", report.failed.len(), results.len());
    }
    Ok(())
}

fn write_json(out: &mut impl Write, results: &[Resolution], report: &BatchReport) -> Result<()> {
    let results = results
        .iter()
        .map(|resolution| match &resolution.outcome {
            Ok(variants) => CodeOutput {
                code: &resolution.code,
                variants: Some(variants.as_slice()),
                error: None,
            },
            Err(err) => CodeOutput {
                code: &resolution.code,
                variants: None,
                error: Some(err.to_string()),
            },
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &BatchOutput { results, report })?;
    writeln!(out)?;
    Ok(())
}

fn write_table(out: &mut impl Write, results: &[Resolution]) -> Result<()> {
    for resolution in results {
        let Ok(variants) = &resolution.outcome else {
            // reported in the summary
            continue;
        };
        if variants.is_empty() {
            continue;
        }

        writeln!(
            out,
            "{}",
            resolution.code.if_supports_color(Stream::Stdout, |c| c.bold())
        )?;
        for variant in variants {
            let language = format!("{:<4}", variant.language);
            writeln!(
                out,
                "  {} {}  {}",
                language.if_supports_color(Stream::Stdout, |l| l.cyan()),
                variant.title,
                variant.url.if_supports_color(Stream::Stdout, |u| u.dimmed())
            )?;
        }
    }
    Ok(())
}

fn log_summary(report: &BatchReport) {
    if !report.not_found.is_empty() {
        log!("resolve"; "not found: {}", report.not_found.join(", "));
    }
    for (code, languages) in &report.missing_languages {
        log!("resolve"; "{}: no article in {}", code, languages.join(", "));
    }
    for failed in &report.failed {
        log!("error"; "{}: {}", failed.code, failed.error);
    }
}
