//! Template cleanup
//!
//! Removes the template repository's own meta files (changelog, license,
//! readme, CI config) from the top level of the scaffolded directory.

use std::collections::BTreeSet;
use std::fs;

use camino::Utf8Path;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Names removed by a cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Removed entry names, sorted
    pub removed: Vec<String>,
}

impl CleanupReport {
    /// Whether nothing was removed
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Removes a fixed set of names from a directory's immediate children
pub struct TemplateCleanup {
    files: BTreeSet<String>,
}

impl TemplateCleanup {
    /// Create a cleanup step for the given file names
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `name` is in the cleanup set
    pub fn is_member(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    /// Remove every top-level entry of `dir` whose name is in the set.
    ///
    /// Subdirectories are not searched. Members that do not exist are skipped.
    /// A directory that cannot be listed, or an entry that cannot be removed,
    /// aborts with [`Error::Filesystem`].
    pub fn run(&self, dir: &Utf8Path) -> Result<CleanupReport> {
        let entries = dir.read_dir_utf8().map_err(|e| Error::filesystem(dir, e))?;

        let mut removed = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::filesystem(dir, e))?;
            let name = entry.file_name();
            if !self.is_member(name) {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| Error::filesystem(path, e))?;
            if file_type.is_dir() {
                fs::remove_dir_all(path).map_err(|e| Error::filesystem(path, e))?;
            } else {
                fs::remove_file(path).map_err(|e| Error::filesystem(path, e))?;
            }

            debug!("Removed {}", path);
            removed.push(name.to_string());
        }

        removed.sort();
        info!("Removed {} template file(s) from {}", removed.len(), dir);
        Ok(CleanupReport { removed })
    }
}
