//! Whole-document conversion: header synthesis plus line-by-line rewriting.
//!
//! Two passes over the same line sequence:
//!
//! 1. **Header scan** - capture title and tags wherever their header lines
//!    appear; order-independent, later headers overwrite earlier ones.
//! 2. **Emission** - write the synthesized metadata header and a blank
//!    separator, then stream every non-header line through the rewriter and
//!    the image/generic directive handling.
//!
//! Conversion is best-effort and always completes; unsupported constructs
//! leave a flagged placeholder in the output and a warning for the caller.

use super::image::ImageDirective;
use super::pattern;
use super::rewrite::{self, Warning};
use super::tags::TagMap;

/// A warning tied to the 0-based source line that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWarning {
    pub line: usize,
    pub warning: Warning,
}

/// Output of one document conversion.
#[derive(Debug)]
pub struct Converted {
    pub text: String,
    pub warnings: Vec<LineWarning>,
}

// =============================================================================
// Metadata Header
// =============================================================================

/// Synthesized post metadata rendered at the top of every converted document.
#[derive(Debug, Clone)]
pub struct PostHeader {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl PostHeader {
    /// Render the comment-wrapped metadata block the site generator reads.
    ///
    /// The trailing spaces on the empty fields are part of the format.
    fn render(&self) -> String {
        format!(
            "<!-- \n\
             .. title: {title}\n\
             .. slug: {slug}\n\
             .. date: {date}\n\
             .. tags: {tags}\n\
             .. category: \n\
             .. link: \n\
             .. description: \n\
             .. type: text\n\
             -->\n",
            title = self.title,
            slug = self.slug,
            date = self.date,
            tags = self.tags.join(","),
        )
    }
}

// =============================================================================
// Converter
// =============================================================================

/// Converts one source document into markdown.
///
/// Created per document and discarded afterwards; the only shared inputs are
/// the read-only tag table and link base.
pub struct Converter<'a> {
    tags: &'a TagMap,
    posts_base: &'a str,
}

impl<'a> Converter<'a> {
    pub fn new(tags: &'a TagMap, posts_base: &'a str) -> Self {
        Self { tags, posts_base }
    }

    /// Convert a full document.
    ///
    /// `slug` and `date` come from the caller (file stem and mtime);
    /// `default_title` is used when no title header is present.
    pub fn convert(
        &self,
        contents: &str,
        slug: &str,
        default_title: &str,
        date: &str,
    ) -> Converted {
        let lines: Vec<&str> = contents.split('\n').collect();

        let (title, tags) = self.scan_headers(&lines);
        let header = PostHeader {
            title: title.unwrap_or_else(|| default_title.to_owned()),
            slug: slug.to_owned(),
            date: date.to_owned(),
            tags,
        };

        let mut out = header.render();
        out.push('\n');

        let mut warnings = Vec::new();
        for (line_num, line) in lines.iter().enumerate() {
            if pattern::is_header(line) {
                continue;
            }
            self.emit_line(line, line_num, &mut out, &mut warnings);
        }

        Converted {
            text: out,
            warnings,
        }
    }

    /// First pass: capture title and tag headers anywhere in the document.
    fn scan_headers(&self, lines: &[&str]) -> (Option<String>, Vec<String>) {
        let mut title = None;
        let mut tags = Vec::new();
        for line in lines {
            if let Some(t) = pattern::title_header(line) {
                title = Some(t.to_owned());
                continue;
            }
            if let Some(raw) = pattern::tag_header(line) {
                tags = raw
                    .split(' ')
                    .filter(|tag| !tag.is_empty())
                    .map(|tag| self.tags.remap(tag).to_owned())
                    .collect();
            }
        }
        (title, tags)
    }

    /// Second pass, one line: link rewrite, format rewrite, then the
    /// image-before-generic directive priority.
    fn emit_line(
        &self,
        line: &str,
        line_num: usize,
        out: &mut String,
        warnings: &mut Vec<LineWarning>,
    ) {
        let (line, warning) = rewrite::rewrite(line, self.posts_base);
        if let Some(warning) = warning {
            warnings.push(LineWarning {
                line: line_num,
                warning,
            });
        }

        // An image-shaped line is handled as an image even though the generic
        // pattern would also match it.
        if let Some(image) = ImageDirective::parse(&line) {
            if image.is_supported() {
                out.push_str(&image.render());
                out.push('\n');
            } else {
                out.push_str(&format!("<pre>FIXME\n{line}\n</pre>\n"));
                warnings.push(LineWarning {
                    line: line_num,
                    warning: Warning::Image,
                });
            }
            return;
        }

        if let Some(name) = pattern::generic_directive(&line) {
            out.push_str(&format!("<pre>FIXME\n{line}\n</pre>\n"));
            warnings.push(LineWarning {
                line: line_num,
                warning: Warning::Directive {
                    name: name.to_owned(),
                },
            });
            return;
        }

        out.push_str(&line);
        out.push('\n');
    }
}

// =============================================================================
// Tests
// =============================================================================
