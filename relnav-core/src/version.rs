//! Semantic-version parsing, ordering, and release classification.
//!
//! Tags arrive as raw strings from the release source (`"v1.2.0"`,
//! `"0.3.1-rc.2"`, …). This module normalises them into `semver::Version`
//! values, produces the totally ordered sequence the navigation model walks,
//! and classifies each release for the timeline glyph strip.
//!
//! Policy: a single malformed tag fails the whole sort, naming the tag.
//! Partial silent drops would leave holes in the ordered timeline.

use semver::Version;

use crate::error::CoreError;

/// A parsed version paired with the raw tag it originated from.
///
/// The raw tag is the key back into the [`crate::ReleaseIndex`]; the parsed
/// version carries all ordering and classification weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedVersion {
    pub tag: String,
    pub version: Version,
}

/// Four-way classification of a release, driving the timeline glyph only.
///
/// Carries no ordering weight. Every non-prerelease version lands in one of
/// the first three classes; `Other` is exactly the prereleases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseClass {
    /// minor = 0, patch = 0, no prerelease (e.g. `2.0.0`).
    Major,
    /// minor ≠ 0, patch = 0, no prerelease (e.g. `2.1.0`).
    Minor,
    /// patch ≠ 0, no prerelease (e.g. `2.1.1`).
    Patch,
    /// Prereleases, regardless of numeric components (e.g. `2.0.0-beta.1`).
    Other,
}

/// Parses a raw tag into a semantic version, tolerating one leading `v`/`V`.
///
/// `"v1.2.0"` and `"1.2.0"` normalise to the same version. Anything that is
/// not `major.minor.patch` with optional prerelease/build suffixes fails
/// with [`CoreError::MalformedVersion`] carrying the original tag.
pub fn parse_version(tag: &str) -> Result<Version, CoreError> {
    let stripped = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);
    Version::parse(stripped).map_err(|_| CoreError::MalformedVersion(tag.to_owned()))
}

/// Classifies a version for the timeline glyph.
///
/// Prereleases always land in `Other`; otherwise a nonzero patch wins, then
/// a nonzero minor, leaving `x.0.0` as major. The cascade is total over
/// non-prerelease versions.
pub fn classify(version: &Version) -> ReleaseClass {
    if !version.pre.is_empty() {
        ReleaseClass::Other
    } else if version.patch != 0 {
        ReleaseClass::Patch
    } else if version.minor != 0 {
        ReleaseClass::Minor
    } else {
        ReleaseClass::Major
    }
}

/// Parses and sorts a set of raw tags into the ordered release sequence.
///
/// Fail-fast: the first malformed tag aborts the whole operation with no
/// partial result. The output is strictly ascending under semver precedence;
/// distinct tags that normalise to the same version (`v1.0.0` vs `1.0.0`)
/// collapse to the first encountered. Duplicate identical tags are expected
/// to be collapsed upstream by the tag-keyed release index.
pub fn sort_tags<'a, I>(tags: I) -> Result<Vec<TaggedVersion>, CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sequence: Vec<TaggedVersion> = tags
        .into_iter()
        .map(|tag| {
            parse_version(tag).map(|version| TaggedVersion {
                tag: tag.to_owned(),
                version,
            })
        })
        .collect::<Result<_, _>>()?;

    sequence.sort_by(|a, b| a.version.cmp(&b.version));
    sequence.dedup_by(|a, b| a.version == b.version);
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_v_is_stripped() {
        assert_eq!(parse_version("v1.2.0").unwrap(), parse_version("1.2.0").unwrap());
    }

    #[test]
    fn malformed_tag_names_the_offender() {
        let err = parse_version("not-a-version").unwrap_err();
        assert_eq!(err, CoreError::MalformedVersion("not-a-version".to_owned()));
    }

    #[test]
    fn prerelease_precedes_the_release_it_precedes() {
        let sorted = sort_tags(vec!["1.0.0", "1.0.0-beta.1"]).unwrap();
        assert_eq!(sorted[0].tag, "1.0.0-beta.1");
        assert_eq!(sorted[1].tag, "1.0.0");
    }

    #[test]
    fn equal_versions_keep_the_first_encountered_tag() {
        let sorted = sort_tags(vec!["v1.0.0", "1.0.0", "0.9.0"]).unwrap();
        let tags: Vec<&str> = sorted.iter().map(|tv| tv.tag.as_str()).collect();
        assert_eq!(tags, vec!["0.9.0", "v1.0.0"]);
    }
}
