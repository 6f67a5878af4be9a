//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve ICD-10 codes to encyclopedia articles
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: icdwiki.toml, if present)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Code space table (JSON), replaces the bundled one
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub code_spaces: Option<PathBuf>,

    /// Enable verbose output for debugging (`-V` is `--version`)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve codes to articles using the live wiki
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Show the chapter of each code (offline)
    #[command(visible_alias = "c")]
    Chapter {
        /// ICD-10 codes, e.g. E10.3
        #[arg(required = true, value_name = "CODE")]
        codes: Vec<String>,
    },

    /// Find a code's entry in a saved chapter page (offline)
    #[command(visible_alias = "s")]
    Scan {
        /// Rendered chapter article (HTML)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// ICD-10 code to look for
        code: String,
    },
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// ICD-10 codes, e.g. E10.3
    #[arg(required = true, value_name = "CODE")]
    pub codes: Vec<String>,

    /// Extra languages to look up (repeatable or comma-separated)
    #[arg(short, long = "language", value_name = "LANG", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Primary language edition, overrides `wiki.language`
    #[arg(short, long, value_name = "LANG")]
    pub primary: Option<String>,

    /// Print results as JSON
    #[arg(short, long)]
    pub json: bool,
}
