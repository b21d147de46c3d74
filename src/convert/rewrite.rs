//! Single-line rewriting of link and inline-format constructs.
//!
//! Each rewrite is a "scan, extract, splice, repeat" loop: find the leftmost
//! occurrence, replace that byte range, rescan the spliced line. The loop
//! terminates because the rewritten markdown forms (`[text](url)`, backtick
//! spans) never match the wiki patterns again, which also makes the rewriter
//! idempotent on its own output.

use std::fmt;
use std::ops::Range;

use super::pattern::{self, LinkMatch};

/// Languages rendered as plain monospace without a follow-up flag.
const MONOSPACE_ONLY: &[&str] = &["sh"];

/// Advisory warning attached to a rewritten line.
///
/// Warnings never abort a conversion; the flagged placeholder in the output
/// is the visible trace, this is the diagnostic for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Inline format directive with a language outside the monospace whitelist.
    Format { syntax: String },
    /// Image directive with attributes outside the supported set.
    Image,
    /// Unrecognized directive, reported by name.
    Directive { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Format { syntax } => {
                write!(f, "format tag needs manual intervention (syntax={syntax})")
            }
            Warning::Image => write!(f, "img tag needs manual intervention"),
            Warning::Directive { name } => write!(f, "{name} tag needs manual intervention"),
        }
    }
}

// =============================================================================
// Line Rewriter
// =============================================================================

/// Apply link and inline-format rewriting to a single line.
///
/// Returns the rewritten line plus at most one warning. When several
/// directives on one line warn, the most recent one wins; callers must not
/// assume the line produced at most one.
pub fn rewrite(line: &str, posts_base: &str) -> (String, Option<Warning>) {
    let linked = rewrite_links(line, posts_base);
    rewrite_format(&linked)
}

/// Rewrite every `[[text|target]]` wiki link on the line into `[text](url)`.
///
/// Targets without a path separator are same-collection references and get
/// the relative `posts_base` prefix; targets with one pass through unchanged.
pub fn rewrite_links(line: &str, posts_base: &str) -> String {
    let mut current = line.to_owned();
    loop {
        let Some((range, replacement)) = link_splice(&current, posts_base) else {
            return current;
        };
        current.replace_range(range, &replacement);
    }
}

fn link_splice(line: &str, posts_base: &str) -> Option<(Range<usize>, String)> {
    let link = pattern::next_link(line)?;
    let target = resolve_link_target(&link, posts_base);
    Some((link.range.clone(), format!("[{}]({})", link.text, target)))
}

/// Resolve a link target, compensating for the malformed double-pipe shape.
fn resolve_link_target(link: &LinkMatch<'_>, posts_base: &str) -> String {
    // The stray pipe lands at the front of the captured target; strip it
    // before path resolution so it can never leak into the emitted URL.
    let target = if link.double_pipe {
        link.target.strip_prefix('|').unwrap_or(link.target)
    } else {
        link.target
    };

    if target.contains('/') {
        target.to_owned()
    } else {
        format!("{posts_base}/{target}")
    }
}

/// Rewrite every `[[!format lang "content"]]` directive into inline code.
///
/// Languages outside the monospace whitelist additionally get a flagged
/// placeholder block and raise a warning; the content itself is preserved.
pub fn rewrite_format(line: &str) -> (String, Option<Warning>) {
    let mut current = line.to_owned();
    let mut warning = None;
    loop {
        let Some(m) = pattern::next_format(&current) else {
            return (current, warning);
        };

        let mut replacement = format!("`{}`", m.content);
        if !MONOSPACE_ONLY.contains(&m.syntax) {
            replacement.push_str(&format!("<pre>FIXME: syntax={}</pre>", m.syntax));
            warning = Some(Warning::Format {
                syntax: m.syntax.to_owned(),
            });
        }
        let range = m.range.clone();
        current.replace_range(range, &replacement);
    }
}

// =============================================================================
// Tests
// =============================================================================
