//! Line-pattern matchers for the wiki markup constructs.
//!
//! Every pattern operates on a single line; there is no multi-line state.
//! Matching is leftmost-first. The rewriting loops in `rewrite` splice one
//! occurrence at a time and rescan, so repeated constructs on a line are all
//! found.
//!
//! | Construct | Shape                                  | Extracted fields   |
//! |-----------|----------------------------------------|--------------------|
//! | Title     | `[[!meta title="..."]]` at line start  | title              |
//! | Tags      | `[[!tag a b c]]` at line start         | raw tag list       |
//! | Link      | `[[text\|target]]` anywhere            | text, target       |
//! | Format    | `[[!format lang "..."]]` anywhere      | syntax, content    |
//! | Image     | `[[!img url k="v" ...]]` at line start | url, attr pairs    |
//! | Generic   | `[[!name ...]]` anywhere               | name               |

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\[!meta\stitle="(?P<title>[^"]+)"\s*\]\]"#).unwrap()
});

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[!tag\s(?P<tags>(\S+\s?)+)\s*\]\]").unwrap());

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(?P<text>[^|]+)\|(?P<target>\S+)\]\]").unwrap());

/// The source renderer also accepts a malformed `[[text||target]]` shape.
/// Tested against a whole `LINK` match to tell the two apart.
static DOUBLE_PIPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[[^|]+\|\|\S+\]\]").unwrap());

static FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[\[!format\s(?P<syntax>\S+)\s+"(?P<content>[^"]+)"\s*\]\]"#)
        .unwrap()
});

static IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\[\[!img\s(?P<url>\S+)(?P<pairs>(\s\w+="[^"]+")*)\s*\]\]"#)
        .unwrap()
});

static GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[!(?P<name>\w+)\s+.*\]\]").unwrap());

static PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*(?P<key>\w+)="(?P<value>[^"]+)""#).unwrap()
});

// =============================================================================
// Header Patterns
// =============================================================================

/// Title string of a `[[!meta title="..."]]` header line.
pub fn title_header(line: &str) -> Option<&str> {
    Some(TITLE.captures(line)?.name("title")?.as_str())
}

/// Raw whitespace-separated tag list of a `[[!tag ...]]` header line.
pub fn tag_header(line: &str) -> Option<&str> {
    Some(TAGS.captures(line)?.name("tags")?.as_str())
}

/// Whether a line is consumed by the header scan (title or tags).
pub fn is_header(line: &str) -> bool {
    TITLE.is_match(line) || TAGS.is_match(line)
}

// =============================================================================
// Body Patterns
// =============================================================================

/// One wiki-link occurrence within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch<'a> {
    /// Byte range of the whole `[[...]]` construct in the line.
    pub range: Range<usize>,
    pub text: &'a str,
    /// Raw target; starts with a stray `|` for the double-pipe shape.
    pub target: &'a str,
    pub double_pipe: bool,
}

/// Leftmost wiki link on the line, if any.
pub fn next_link(line: &str) -> Option<LinkMatch<'_>> {
    let caps = LINK.captures(line)?;
    let whole = caps.get(0)?;
    Some(LinkMatch {
        range: whole.range(),
        text: caps.name("text")?.as_str(),
        target: caps.name("target")?.as_str(),
        double_pipe: DOUBLE_PIPE.is_match(whole.as_str()),
    })
}

/// One inline-format occurrence within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatMatch<'a> {
    /// Byte range of the whole directive in the line.
    pub range: Range<usize>,
    pub syntax: &'a str,
    pub content: &'a str,
}

/// Leftmost inline-format directive on the line, if any.
pub fn next_format(line: &str) -> Option<FormatMatch<'_>> {
    let caps = FORMAT.captures(line)?;
    Some(FormatMatch {
        range: caps.get(0)?.range(),
        syntax: caps.name("syntax")?.as_str(),
        content: caps.name("content")?.as_str(),
    })
}

/// Raw fields of an image directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageMatch<'a> {
    pub url: &'a str,
    /// Unparsed `key="value"` pairs; feed through [`attr_pairs`].
    pub pairs: &'a str,
}

/// Image directive shape, matched at line start only.
pub fn image_directive(line: &str) -> Option<ImageMatch<'_>> {
    let caps = IMAGE.captures(line)?;
    Some(ImageMatch {
        url: caps.name("url")?.as_str(),
        pairs: caps.name("pairs").map_or("", |m| m.as_str()),
    })
}

/// Name of the leftmost directive on the line, for the generic fallback.
pub fn generic_directive(line: &str) -> Option<&str> {
    Some(GENERIC.captures(line)?.name("name")?.as_str())
}

/// Iterate the `key="value"` pairs of an image directive's attribute tail.
pub fn attr_pairs<'a>(pairs: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    PAIR.captures_iter(pairs).filter_map(|caps| {
        let key = caps.name("key")?.as_str();
        let value = caps.name("value")?.as_str();
        Some((key, value))
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_header() {
        assert_eq!(
            title_header(r#"[[!meta title="Hello World"]]"#),
            Some("Hello World")
        );
        // Only matched at line start
        assert_eq!(title_header(r#"x [[!meta title="Hello"]]"#), None);
        assert_eq!(title_header("plain text"), None);
    }

    #[test]
    fn test_tag_header() {
        assert_eq!(tag_header("[[!tag linux debian]]"), Some("linux debian"));
        assert_eq!(tag_header("[[!tag solo]]"), Some("solo"));
        assert_eq!(tag_header("  [[!tag indented]]"), None);
    }

    #[test]
    fn test_next_link_fields() {
        let link = next_link("see [[my post|other_post]] for details").unwrap();
        assert_eq!(link.text, "my post");
        assert_eq!(link.target, "other_post");
        assert!(!link.double_pipe);
        assert_eq!(&"see [[my post|other_post]] for details"[link.range], "[[my post|other_post]]");
    }

    #[test]
    fn test_next_link_double_pipe() {
        let link = next_link("see [[my post||other_post]]").unwrap();
        assert!(link.double_pipe);
        assert_eq!(link.target, "|other_post");
    }

    #[test]
    fn test_next_link_none_without_pipe() {
        assert!(next_link("[[!img foo.png]]").is_none());
        assert!(next_link("[text](url)").is_none());
    }

    #[test]
    fn test_next_format_fields() {
        let m = next_format(r#"run [[!format sh "ls -la"]] now"#).unwrap();
        assert_eq!(m.syntax, "sh");
        assert_eq!(m.content, "ls -la");
    }

    #[test]
    fn test_image_directive_anchored() {
        let m = image_directive(r#"[[!img pics/cat.png alt="a cat"]]"#).unwrap();
        assert_eq!(m.url, "pics/cat.png");
        assert_eq!(m.pairs, r#" alt="a cat""#);
        assert!(image_directive(r#"text [[!img pics/cat.png]]"#).is_none());
    }

    #[test]
    fn test_image_directive_bare_url() {
        let m = image_directive("[[!img pics/cat.png]]").unwrap();
        assert_eq!(m.url, "pics/cat.png");
        assert_eq!(m.pairs, "");
    }

    #[test]
    fn test_generic_directive_name() {
        assert_eq!(generic_directive("[[!toc levels=2]]"), Some("toc"));
        assert_eq!(generic_directive("[[!calendar type month]]"), Some("calendar"));
        // A bare directive with no arguments is not matched
        assert_eq!(generic_directive("[[!toc]]"), None);
        assert_eq!(generic_directive("plain"), None);
    }

    #[test]
    fn test_attr_pairs() {
        let pairs: Vec<_> = attr_pairs(r#" alt="a cat" size="240""#).collect();
        assert_eq!(pairs, vec![("alt", "a cat"), ("size", "240")]);
    }
}
