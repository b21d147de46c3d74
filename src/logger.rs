//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `ProgressLine` for single-line progress display during batch imports
//!
//! # Example
//!
//! ```ignore
//! // Simple logging
//! log!("import"; "converting {} posts", count);
//!
//! // Progress line for a batch
//! let progress = ProgressLine::new("posts", 42);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Whether a progress line is currently on screen (for log coordination)
static BAR_ACTIVE: AtomicBool = AtomicBool::new(false);

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
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
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

/// Log a message with a colored module prefix.
///
/// Diagnostics (warning/error/skip) go to stderr so converted-content
/// summaries on stdout stay machine-readable.
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);
    let to_stderr = matches!(module_lower.as_str(), "warning" | "error" | "skip");

    // A progress line may be on the current row: clear it, print the
    // message, and let the next inc() redraw it below.
    let mut stdout = stdout().lock();
    if BAR_ACTIVE.load(Ordering::SeqCst) {
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
    }

    if to_stderr {
        stdout.flush().ok();
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
    } else {
        writeln!(stdout, "{prefix} {message}").ok();
        stdout.flush().ok();
    }
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "import" => prefix.bright_blue().bold().to_string(),
        "write" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line (single-line counter)
// ============================================================================

/// Single-line progress display for batch conversion
///
/// Displays: `[import] posts(17/42)`
///
/// The counter updates in place on the same line. Uses `try_lock` to avoid
/// blocking worker threads - if display is busy, the refresh is skipped
///
/// # Example
///
/// ```ignore
/// let progress = ProgressLine::new("posts", sources.len());
/// progress.inc();
/// progress.finish(); // keeps the line, moves cursor down
/// ```
pub struct ProgressLine {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl ProgressLine {
    /// Create a new progress display and draw the initial counter.
    pub fn new(name: &'static str, total: usize) -> Self {
        BAR_ACTIVE.store(true, Ordering::SeqCst);

        let progress = Self {
            name,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        };
        progress.display();
        progress
    }

    /// Increment the counter.
    ///
    /// Non-blocking: if the display lock is held, skips the refresh.
    #[inline]
    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        // Non-blocking: skip display if lock is held
        if self.lock.try_lock().is_some() {
            self.display();
        }
    }

    /// Display the current progress line (overwrites current line with \r).
    fn display(&self) {
        let current = self.current.load(Ordering::Relaxed);
        let prefix = colorize_prefix("import", "import");

        let mut stdout = stdout().lock();
        // Clear line and write progress (no newline - stays on same line)
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        write!(stdout, "{} {}({}/{})", prefix, self.name, current, self.total).ok();
        stdout.flush().ok();
    }

    /// Finish progress display, preserve line and move to next line.
    pub fn finish(self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);

        {
            let _guard = self.lock.lock(); // Wait for any pending display

            let current = self.current.load(Ordering::Relaxed);
            let prefix = colorize_prefix("import", "import");

            let mut stdout = stdout().lock();
            // Final line with newline to preserve it
            execute!(
                stdout,
                cursor::MoveToColumn(0),
                Clear(ClearType::CurrentLine)
            )
            .ok();
            writeln!(stdout, "{} {}({}/{})", prefix, self.name, current, self.total).ok();
            stdout.flush().ok();
        }

        std::mem::forget(self); // Prevent Drop from clearing
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        BAR_ACTIVE.store(false, Ordering::SeqCst);

        // Clear the line on drop (if not finished properly)
        let mut stdout = stdout().lock();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )
        .ok();
        stdout.flush().ok();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_roundtrip() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_progress_counter() {
        let progress = ProgressLine::new("posts", 3);
        progress.inc();
        progress.inc();
        assert_eq!(progress.current.load(Ordering::Relaxed), 2);
        progress.finish();
    }
}
