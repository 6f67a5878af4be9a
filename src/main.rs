//! icdwiki - resolve ICD-10 codes to encyclopedia articles.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use icdwiki::config::CONFIG_FILE;
use icdwiki::{ResolverConfig, debug, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Resolve { args } => cli::resolve::run_resolve(args, &config),
        Commands::Chapter { codes } => cli::chapter::run_chapter(codes, &config),
        Commands::Scan { file, code } => cli::scan::run_scan(file, code),
    }
}

/// Load config file and environment, then apply CLI overrides.
fn load_config(cli: &Cli) -> Result<ResolverConfig> {
    let path = match &cli.config {
        Some(path) => Some(path.as_path()),
        None => Some(Path::new(CONFIG_FILE)).filter(|path| path.is_file()),
    };
    if let Some(path) = path {
        debug!("config"; "loading {}", path.display());
    }

    let mut config = ResolverConfig::load(path).context("failed to load config")?;

    if let Some(table) = &cli.code_spaces {
        config.resolver.code_spaces = Some(table.clone());
    }
    if let Commands::Resolve { args } = &cli.command
        && let Some(primary) = &args.primary
    {
        config.wiki.language = primary.clone();
    }
    config.validate().context("invalid configuration")?;

    Ok(config)
}
