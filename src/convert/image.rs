//! Image directive parsing, support judgment, and rendering.

use std::collections::BTreeMap;

use super::pattern;

/// Attribute names the markdown rendering can express. Any attribute outside
/// this set disqualifies the whole directive; there is no partial rendering.
const SUPPORTED_ATTRS: &[&str] = &["url", "alt", "size"];

/// Parsed image directive: normalized URL plus `key="value"` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirective {
    pub url: String,
    pub attrs: BTreeMap<String, String>,
}

impl ImageDirective {
    /// Parse a line with image-directive shape.
    ///
    /// Returns `None` when the line is not an image directive. A `url`
    /// attribute pair overrides the positional URL, matching the source
    /// renderer's last-wins attribute handling.
    pub fn parse(line: &str) -> Option<Self> {
        let image = pattern::image_directive(line)?;

        let mut attrs = BTreeMap::new();
        for (key, value) in pattern::attr_pairs(image.pairs) {
            attrs.insert(key.to_owned(), value.to_owned());
        }

        let url = attrs.remove("url").unwrap_or_else(|| image.url.to_owned());
        Some(Self {
            url: normalize_url(&url),
            attrs,
        })
    }

    /// A directive is supported iff every attribute is in the allow-list.
    pub fn is_supported(&self) -> bool {
        self.attrs
            .keys()
            .all(|key| SUPPORTED_ATTRS.contains(&key.as_str()))
    }

    /// Render as markdown, or as a sized `<img>` element when `size` is set.
    ///
    /// Only call for supported directives; `alt` defaults to empty.
    pub fn render(&self) -> String {
        let alt = self.attrs.get("alt").map_or("", String::as_str);
        match self.attrs.get("size") {
            Some(size) => format!(
                r#"<img src="{}" alt="{alt}" height="{size}px"></img>"#,
                self.url
            ),
            None => format!("![{alt}]({})", self.url),
        }
    }
}

/// Absolute http(s) URLs pass through; everything else becomes site-root
/// relative.
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("/{url}")
    }
}

// =============================================================================
// Tests
// =============================================================================
