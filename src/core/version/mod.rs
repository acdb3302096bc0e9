//! Version derivation from repository state.
//!
//! A version is at most three space-separated fields in fixed order: an
//! optional tag, the 40-character commit hash, and an optional dirty
//! marker.
//!
//! For a clean repository without tags, resolution yields a bare hash:
//!
//! ```text
//! 26249145DAB6C65DBFEEDF7D01AA2720F51A815F
//! ```
//!
//! With a tag and uncommitted changes to tracked files:
//!
//! ```text
//! v1.0.0 26249145DAB6C65DBFEEDF7D01AA2720F51A815F uncommitted
//! ```

use std::fmt;
use std::io;

use regex::Regex;
use serde::Serialize;

use super::git::GitCli;

/// Marker appended when the working tree has uncommitted changes.
pub const DIRTY_MARKER: &str = "uncommitted";

/// Status phrase for staged-but-uncommitted changes.
const STAGED_PHRASE: &str = "Changes to be committed";

/// Status phrase for unstaged modifications to tracked files.
const UNSTAGED_PHRASE: &str = "Changes not staged for commit";

/// Commit hash pattern, anchored to the first line of `git log -1`
/// output.
const COMMIT_PATTERN: &str = r"^commit ([0-9a-fA-F]{40})";

/// Version resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The commit query failed: not a repository, or no commits yet.
    #[error("git log failed (need to `git init` and commit first?): {0}")]
    NoCommit(#[source] io::Error),

    /// The commit query succeeded but its output had no
    /// `commit <40-hex>` line.
    #[error("no 40-character commit hash found in git log output")]
    MalformedOutput,

    /// The tag query itself failed.
    #[error("git tag query failed: {0}")]
    TagQuery(#[source] io::Error),

    /// The status query itself failed.
    #[error("git status query failed: {0}")]
    StatusQuery(#[source] io::Error),
}

/// A resolved build version.
///
/// Renders via [`Display`](fmt::Display) as `[<tag> ]<hash>[ uncommitted]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    /// Most recently created tag, if the repository has any.
    pub tag: Option<String>,

    /// Upper-case 40-character hex commit hash.
    pub hash: String,

    /// Whether the working tree had staged or unstaged changes.
    pub dirty: bool,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{tag} ")?;
        }
        write!(f, "{}", self.hash)?;
        if self.dirty {
            write!(f, " {DIRTY_MARKER}")?;
        }
        Ok(())
    }
}

/// Derives a [`Version`] from three git queries.
pub struct Resolver<'a> {
    git: &'a dyn GitCli,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a git interface.
    #[must_use]
    pub const fn new(git: &'a dyn GitCli) -> Self {
        Self { git }
    }

    /// Resolve the current repository state into a version.
    ///
    /// Queries git exactly three times, in order: last commit, tag list,
    /// status. The first failure is surfaced immediately; a malformed
    /// commit entry stops resolution before the tag and status queries
    /// run. There are no retries.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoCommit`] when the commit query fails,
    /// [`ResolveError::MalformedOutput`] when no hash can be extracted,
    /// and [`ResolveError::TagQuery`] / [`ResolveError::StatusQuery`]
    /// when those invocations fail.
    pub fn resolve(&self) -> Result<Version, ResolveError> {
        let log = self
            .git
            .last_commit_text()
            .map_err(ResolveError::NoCommit)?;
        let hash = extract_hash(&log).ok_or(ResolveError::MalformedOutput)?;

        let tags = self.git.tag_list_text().map_err(ResolveError::TagQuery)?;
        let tag = tags
            .lines()
            .next()
            .map(str::to_owned)
            .filter(|t| !t.is_empty());

        let status = self.git.status_text().map_err(ResolveError::StatusQuery)?;
        let dirty = status.contains(STAGED_PHRASE) || status.contains(UNSTAGED_PHRASE);

        Ok(Version { tag, hash, dirty })
    }
}

/// Extract the upper-cased commit hash from `git log -1` output.
fn extract_hash(log: &str) -> Option<String> {
    let re = Regex::new(COMMIT_PATTERN).ok()?;
    re.captures(log).map(|c| c[1].to_ascii_uppercase())
}
