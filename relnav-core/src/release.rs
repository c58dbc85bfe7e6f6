//! The tag → release mapping built once from the fetch result.
//!
//! The fetch keys data by raw tag string while navigation operates on
//! parsed versions; this index resolves the focused `TaggedVersion` back to
//! the text the viewport should show.

use std::collections::HashMap;

/// A single fetched release: raw tag plus its markdown description.
///
/// Immutable once constructed. The description may be empty — GitHub
/// reports a null body for releases published without notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub description: String,
}

/// Lookup table from raw tag string to its release.
///
/// Tags are case-sensitive keys. Duplicate tags in the source data collapse
/// last-write-wins, which is acceptable because the sort layer dedups by
/// normalised version anyway.
#[derive(Debug, Default)]
pub struct ReleaseIndex {
    by_tag: HashMap<String, Release>,
}

impl ReleaseIndex {
    /// Builds the index from a fetch result.
    pub fn from_releases<I>(releases: I) -> Self
    where
        I: IntoIterator<Item = Release>,
    {
        let by_tag = releases
            .into_iter()
            .map(|release| (release.tag.clone(), release))
            .collect();
        Self { by_tag }
    }

    /// Resolves a raw tag to its release.
    ///
    /// Absence should not occur for tags that came out of this same index,
    /// but callers must treat it as a degraded state (placeholder body),
    /// never a crash.
    pub fn lookup(&self, tag: &str) -> Option<&Release> {
        self.by_tag.get(tag)
    }

    /// Iterates the raw tag keys in arbitrary order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_tags_collapse_last_write_wins() {
        let index = ReleaseIndex::from_releases(vec![
            Release { tag: "v1.0.0".to_owned(), description: "first".to_owned() },
            Release { tag: "v1.0.0".to_owned(), description: "second".to_owned() },
        ]);
        assert_eq!(index.tags().count(), 1);
        assert_eq!(index.lookup("v1.0.0").unwrap().description, "second");
    }

    #[test]
    fn tags_are_case_sensitive_keys() {
        let index = ReleaseIndex::from_releases(vec![
            Release { tag: "v1.0.0".to_owned(), description: String::new() },
            Release { tag: "V1.0.0".to_owned(), description: String::new() },
        ]);
        assert_eq!(index.tags().count(), 2);
        assert!(index.lookup("v1.0.0").is_some());
        assert!(index.lookup("V1.0.0").is_some());
    }
}
