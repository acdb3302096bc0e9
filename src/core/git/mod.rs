//! Narrow interface over the git command-line tool.
//!
//! Version resolution needs exactly three pieces of git text output.
//! Keeping them behind a trait lets tests supply canned output without
//! spawning processes.

use std::io;
use std::path::PathBuf;
use std::process::Command;

/// The three git queries version resolution is built from.
///
/// Each method returns the raw stdout of one git invocation. A failed
/// invocation (spawn failure or non-zero exit) is an error; callers
/// decide what that means for resolution.
pub trait GitCli {
    /// Output of `git log -1`: the most recent commit log entry.
    fn last_commit_text(&self) -> io::Result<String>;

    /// Output of `git tag --sort=-taggerdate`: tag names, newest first,
    /// one per line. Empty when the repository has no tags.
    fn tag_list_text(&self) -> io::Result<String>;

    /// Output of `git status`: free-form working tree status.
    fn status_text(&self) -> io::Result<String>;
}

/// [`GitCli`] backed by the real `git` binary.
///
/// Invocations are synchronous and blocking; each call runs one
/// subprocess to completion.
#[derive(Debug, Default)]
pub struct SystemGit {
    /// Directory the commands run in, or the process cwd when `None`.
    repo_dir: Option<PathBuf>,
}

impl SystemGit {
    /// Run git in the current working directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { repo_dir: None }
    }

    /// Run git in a specific repository directory.
    #[must_use]
    pub fn in_dir(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: Some(repo_dir.into()),
        }
    }

    fn run(&self, args: &[&str]) -> io::Result<String> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;

        if !output.status.success() {
            return Err(io::Error::other(format!(
                "git {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitCli for SystemGit {
    fn last_commit_text(&self) -> io::Result<String> {
        self.run(&["log", "-1"])
    }

    fn tag_list_text(&self) -> io::Result<String> {
        self.run(&["tag", "--sort=-taggerdate"])
    }

    fn status_text(&self) -> io::Result<String> {
        self.run(&["status"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_git_fails_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let git = SystemGit::in_dir(dir.path());

        assert!(git.last_commit_text().is_err());
    }

    #[test]
    fn in_dir_stores_the_directory() {
        let git = SystemGit::in_dir("/tmp/repo");
        assert_eq!(git.repo_dir, Some(PathBuf::from("/tmp/repo")));
    }
}
