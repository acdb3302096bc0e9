//! gitstamp - build version strings derived from git state.
//!
//! Uses the git CLI to construct a version string from the latest tag,
//! the most recent commit hash, and the working tree status, then
//! persists it next to a build timestamp for later retrieval by a
//! running program.
//!
//! For a clean commit in an untagged repository, resolution returns a
//! bare hash:
//!
//! ```text
//! 26249145DAB6C65DBFEEDF7D01AA2720F51A815F
//! ```
//!
//! If tracked files have changed, `uncommitted` is appended:
//!
//! ```text
//! 26249145DAB6C65DBFEEDF7D01AA2720F51A815F uncommitted
//! ```
//!
//! If the repository has tags, the newest tag name is prepended:
//!
//! ```text
//! v1.0.0 26249145DAB6C65DBFEEDF7D01AA2720F51A815F uncommitted
//! ```
//!
//! The persisted file is two lines (version, then build timestamp) and
//! is read back leniently, so a truncated or hand-edited file still
//! yields the fields it has.

pub mod cli;
pub mod core;

pub use core::git::{GitCli, SystemGit};
pub use core::store::{Record, Store, StoreError, WriteOptions};
pub use core::version::{ResolveError, Resolver, Version};
