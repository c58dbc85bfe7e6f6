use thiserror::Error;

/// Errors surfaced by the core navigation model.
///
/// Both variants are session-fatal for the caller: a malformed tag would
/// corrupt the ordered timeline if silently dropped, and an empty release
/// list leaves nothing to focus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A tag (user-supplied starting version or fetched release tag) is not
    /// a valid semantic version. Carries the offending string verbatim.
    #[error("malformed version tag {0:?}")]
    MalformedVersion(String),

    /// The fetch returned no releases, so no focus position exists.
    #[error("no releases found")]
    NoReleases,
}
