//! The focus state machine over the ordered release sequence.
//!
//! An earlier iteration of this tool linked each version to mutable
//! previous/next node references; this model is a flat ordered sequence
//! plus an integer focus index — the same navigational power with no
//! pointer aliasing, and trivially assertable in tests.

use semver::Version;

use crate::error::CoreError;
use crate::version::TaggedVersion;

/// How the initial focus position was determined at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialFocus {
    /// A release strictly newer than the requested starting version exists
    /// and focus landed on the first such release.
    Match,
    /// No release exceeds the requested starting version; focus fell back
    /// to the last (highest) release. Non-fatal — callers surface a notice.
    FellBackToLatest,
}

/// Focus position within the immutable ordered release sequence.
///
/// Invariant: `focus < sequence.len()` from construction onward. The
/// sequence is built once after the fetch completes and never recomputed;
/// only the focus index moves.
#[derive(Debug)]
pub struct NavigationModel {
    sequence: Vec<TaggedVersion>,
    focus: usize,
}

impl NavigationModel {
    /// Builds the model and computes the initial focus.
    ///
    /// Focus lands on the first release whose version strictly exceeds
    /// `start`. When none does, it falls back to the highest release rather
    /// than leaving focus unset, since an unset focus would break every
    /// subsequent invariant. An empty sequence is a construction error.
    pub fn new(
        sequence: Vec<TaggedVersion>,
        start: &Version,
    ) -> Result<(Self, InitialFocus), CoreError> {
        if sequence.is_empty() {
            return Err(CoreError::NoReleases);
        }
        let (focus, placement) = match sequence.iter().position(|tv| tv.version > *start) {
            Some(index) => (index, InitialFocus::Match),
            None => (sequence.len() - 1, InitialFocus::FellBackToLatest),
        };
        Ok((Self { sequence, focus }, placement))
    }

    /// The ordered sequence, ascending by semver precedence.
    pub fn sequence(&self) -> &[TaggedVersion] {
        &self.sequence
    }

    /// Current focus index into [`Self::sequence`].
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The currently focused entry.
    pub fn focused(&self) -> &TaggedVersion {
        &self.sequence[self.focus]
    }

    /// Moves focus one release newer. No-op at the upper bound.
    ///
    /// Returns whether focus actually moved, so callers re-render the body
    /// exactly once per real transition. The bounds clamp (rather than a
    /// wrap) keeps "rightmost = newest" unambiguous on the timeline.
    pub fn next(&mut self) -> bool {
        if self.focus + 1 < self.sequence.len() {
            self.focus += 1;
            true
        } else {
            false
        }
    }

    /// Moves focus one release older. No-op at the lower bound.
    pub fn prev(&mut self) -> bool {
        if self.focus > 0 {
            self.focus -= 1;
            true
        } else {
            false
        }
    }
}

/// Constrains `value` to `[low, high]`, swapping inverted bounds first.
///
/// The viewport width/height computation can transiently invert its range
/// during startup resize sequences, so `clamp(v, 10, 1)` must behave as
/// `clamp(v, 1, 10)` instead of panicking the way `Ord::clamp` would.
pub fn clamp<T: Ord>(value: T, low: T, high: T) -> T {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    value.clamp(low, high)
}
