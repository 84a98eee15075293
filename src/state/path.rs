use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use fs_err::canonicalize;

use crate::errors::{Handle, Result};

/// Separator between entries of a search path variable
const SEPARATOR: char = ':';

/// An ordered, colon-delimited list of directories, such as `PATH` or `PYTHONPATH`
/// Segments are kept as plain strings so a prior value survives untouched,
/// including any empty segments it may contain
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPath {
    segments: Vec<String>,
}

impl Display for SearchPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join(&SEPARATOR.to_string()))
    }
}

impl SearchPath {
    /// Builds a search path from the previous value of its variable
    /// An unset variable and an empty one both produce a path with no segments
    pub fn from_prior(prior: Option<&str>) -> Self {
        let segments = match prior {
            Some(value) if !value.is_empty() => value.split(SEPARATOR).map(String::from).collect(),
            _ => Vec::new(),
        };

        Self { segments }
    }

    /// Appends a segment to the end of the path
    // * Segments already present are appended again, repeated setup accumulates duplicates
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }
}

/// The absolute directory the project lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHome {
    absolute_path: PathBuf,
    display_path: String,
}

impl Display for ProjectHome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_path)
    }
}

impl ProjectHome {
    /// Resolves the project home as the directory containing the initializer
    /// The result does not depend on the working directory the initializer was started from
    pub fn locate(initializer: &Path) -> Result<Self> {
        let resolved = canonicalize(initializer)
            .replace_err(|| config_err!(CannotResolveLocation(initializer.to_path_buf())))?;
        let directory = resolved
            .parent()
            .replace_err(|| config_err!(CannotResolveLocation(resolved.clone())))?;

        Self::from_absolute(directory.to_path_buf())
    }

    /// Uses an explicitly given directory as the project home
    pub fn from_override(directory: &Path) -> Result<Self> {
        let resolved = canonicalize(directory)
            .replace_err(|| config_err!(CannotResolveLocation(directory.to_path_buf())))?;

        Self::from_absolute(resolved)
    }

    fn from_absolute(absolute_path: PathBuf) -> Result<Self> {
        let display_path = absolute_path
            .to_str()
            .replace_err(|| config_err!(NonUnicodeHome(absolute_path.clone())))?
            .to_owned();

        Ok(Self {
            absolute_path,
            display_path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.absolute_path
    }

    /// Returns `<home>/<segment>` as a string
    pub fn join(&self, segment: &str) -> String {
        join_segment(&self.display_path, segment)
    }
}

/// Joins a directory string and a relative segment with exactly one slash
// * An empty directory yields `/segment`, which is what an unset variable expands to in a shell
pub fn join_segment(directory: &str, segment: &str) -> String {
    format!("{}/{}", directory.trim_end_matches('/'), segment)
}
