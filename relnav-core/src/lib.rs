//! Core navigation model for relnav.
//!
//! Everything in this crate is pure state with no I/O: semantic-version
//! parsing and ordering (`version`), the tag → release-text index
//! (`release`), and the focus state machine plus the defensive `clamp`
//! helper (`navigate`). The TUI binary owns the terminal, the network
//! fetch, and rendering; it drives this crate exclusively from its event
//! loop, so nothing here needs to be `Sync` or care about threads.

pub mod error;
pub mod navigate;
pub mod release;
pub mod version;

pub use error::CoreError;
pub use navigate::{clamp, InitialFocus, NavigationModel};
pub use release::{Release, ReleaseIndex};
pub use version::{classify, parse_version, sort_tags, ReleaseClass, TaggedVersion};
