//! Two-line version file persistence and read-back.
//!
//! A version file looks like this:
//!
//! ```text
//! 0.0.1 EF8F94357058CE9CBA81909016B138E6D54C0381 uncommitted
//! 2017/02/28 19:49:11
//! ```
//!
//! Line 1 is the version string, line 2 the local build timestamp.
//! Each write replaces the file whole; reads are line-at-a-time and
//! tolerate files shorter than two lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write as _};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use super::git::GitCli;
use super::version::{ResolveError, Resolver};

/// Default version file name when the caller supplies no path.
pub const DEFAULT_FILE: &str = "VERSION";

/// Format of the line-2 build timestamp, local time.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File open/read/write failure.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Version resolution failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Store result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Options controlling what [`Store::write`] persists.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Append the build timestamp line. When disabled the file is a
    /// single line and byte-identical across builds of the same
    /// repository state.
    pub timestamp: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { timestamp: true }
    }
}

/// The persisted record: version line and timestamp line, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Line 1: the version string.
    pub version: String,

    /// Line 2: the build timestamp, empty when absent.
    pub build_date: String,
}

/// File-backed version store.
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store at `path`, or at [`DEFAULT_FILE`] when `path` is
    /// `None` or empty.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));
        Self { path }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a fresh version and replace the file with it.
    ///
    /// Prior content is destroyed (create-truncate semantics, no atomic
    /// rename). Line 1 is the version string; line 2 is the local build
    /// timestamp unless disabled in `options`, in which case the file
    /// holds the single version line.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails or the file cannot be
    /// written. Nothing is written when resolution fails.
    pub fn write(&self, git: &dyn GitCli, options: &WriteOptions) -> Result<Record> {
        let version = Resolver::new(git).resolve()?;

        let record = Record {
            version: version.to_string(),
            build_date: if options.timestamp {
                Local::now().format(TIMESTAMP_FORMAT).to_string()
            } else {
                String::new()
            },
        };

        let mut file = File::create(&self.path)?;
        if options.timestamp {
            write!(file, "{}\n{}", record.version, record.build_date)?;
        } else {
            write!(file, "{}", record.version)?;
        }

        tracing::info!(
            path = %self.path.display(),
            version = %record.version,
            "wrote version file"
        );

        Ok(record)
    }

    /// Read the record back.
    ///
    /// Reads the first two lines; a file with fewer lines yields empty
    /// strings for the missing fields rather than an error, so
    /// hand-edited or truncated files stay readable.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file cannot be opened or read.
    pub fn read(&self) -> Result<Record> {
        let file = File::open(&self.path)?;
        let mut lines = BufReader::new(file).lines();

        let version = lines.next().transpose()?.unwrap_or_default();
        let build_date = lines.next().transpose()?.unwrap_or_default();

        Ok(Record {
            version,
            build_date,
        })
    }

    /// Render the stored record as a flat JSON object.
    ///
    /// Keys are emitted in fixed order: `tag`, `hash`, `committed` (only
    /// when the version line has a third field), `build_date`. The split
    /// is positional, not semantic: when the repository had no tag, the
    /// `tag` key holds the hash. That quirk is part of the external
    /// contract and is kept as-is.
    ///
    /// Values are emitted unescaped, so output containing quote
    /// characters is not guaranteed to satisfy strict JSON parsers.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file cannot be opened or read.
    pub fn read_json(&self) -> Result<String> {
        let record = self.read()?;
        let mut fields = record.version.split(' ');

        let tag = fields.next().unwrap_or_default();
        let hash = fields.next().unwrap_or_default();
        let committed = fields.next();

        let mut json = format!(r#"{{"tag":"{tag}","hash":"{hash}","#);
        if let Some(committed) = committed {
            json.push_str(&format!(r#""committed":"{committed}","#));
        }
        json.push_str(&format!(r#""build_date":"{}"}}"#, record.build_date));

        Ok(json)
    }
}
