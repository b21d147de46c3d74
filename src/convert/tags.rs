//! Tag remapping table.

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Immutable tag remap table, loaded once from `[tags]` in wikiport.toml.
///
/// Threaded into each conversion as a read-only value, so parallel document
/// workers share it without any mutable global.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    map: FxHashMap<String, String>,
}

impl TagMap {
    /// Replacement for a tag; tags absent from the table pass through.
    pub fn remap<'a>(&'a self, tag: &'a str) -> &'a str {
        self.map.get(tag).map_or(tag, String::as_str)
    }
}

impl FromIterator<(String, String)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_identity_when_absent() {
        let tags = TagMap::default();
        assert_eq!(tags.remap("linux"), "linux");
    }

    #[test]
    fn test_remap_replacement_when_present() {
        let tags: TagMap = [("linux".to_string(), "gnu-linux".to_string())]
            .into_iter()
            .collect();
        assert_eq!(tags.remap("linux"), "gnu-linux");
        assert_eq!(tags.remap("debian"), "debian");
    }
}
