//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, printed only in verbose mode
//! - `ProgressLine` for a single-line counter while a batch is resolving
//!
//! All output goes to stderr, stdout is reserved for resolver results.
//!
//! # Example
//!
//! ```ignore
//! log!("resolve"; "resolving {} codes", count);
//! debug!("wiki"; "search '{}'", query);
//!
//! let progress = ProgressLine::new("resolve", 42);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Text of the progress line currently occupying the last terminal line
static PROGRESS_TEXT: Mutex<Option<String>> = Mutex::new(None);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut err = stderr().lock();
    let progress = PROGRESS_TEXT.lock();
    write_above_progress(&mut err, &format!("{prefix} {message}"), progress.as_deref());
}

/// Print `line`, keeping an active progress line at the bottom.
fn write_above_progress(out: &mut impl Write, line: &str, progress: Option<&str>) {
    if progress.is_some() {
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }
    writeln!(out, "{line}").ok();
    if let Some(progress) = progress {
        write!(out, "{progress}").ok();
    }
    out.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let color = match module.to_ascii_lowercase().as_str() {
        "error" => AnsiColors::BrightRed,
        "warning" => AnsiColors::BrightMagenta,
        "wiki" | "cache" => AnsiColors::BrightBlue,
        "resolve" => AnsiColors::BrightGreen,
        _ => AnsiColors::BrightYellow,
    };
    let style = Style::new().color(color).bold();

    format!("[{module}]")
        .if_supports_color(Stream::Stderr, |prefix| prefix.style(style))
        .to_string()
}

// ============================================================================
// Progress Line
// ============================================================================

/// Single-line progress counter
///
/// Displays: `[resolve] 12/40`
///
/// Safe to share between worker threads. Uses `try_lock` so workers never
/// block on the terminal: if a redraw is in flight, the update is skipped.
pub struct ProgressLine {
    label: &'static str,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl ProgressLine {
    pub fn new(label: &'static str, total: usize) -> Self {
        let progress = Self {
            label,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        };
        progress.display();
        progress
    }

    /// Count one finished item.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.lock.try_lock() {
            self.display();
        }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::Relaxed)
    }

    fn render(&self) -> String {
        format!(
            "{} {}/{}",
            colorize_prefix(self.label),
            self.current(),
            self.total
        )
    }

    fn display(&self) {
        let text = self.render();
        let mut err = stderr().lock();
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        write!(err, "{text}").ok();
        err.flush().ok();
        *PROGRESS_TEXT.lock() = Some(text);
    }

    /// Print the final count and leave it on screen.
    pub fn finish(self) {
        {
            let _guard = self.lock.lock();
            let mut err = stderr().lock();
            execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
            writeln!(err, "{}", self.render()).ok();
            err.flush().ok();
            *PROGRESS_TEXT.lock() = None;
        }
        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        let mut err = stderr().lock();
        *PROGRESS_TEXT.lock() = None;
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        err.flush().ok();
    }
}
