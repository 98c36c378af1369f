//! Provenance gate
//!
//! Confirms the working repository was cloned from the CookieScript template
//! by looking for an `origin` remote whose URL matches the template
//! repository. This is a sanity check on metadata, not a security control.

use std::sync::LazyLock;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use tracing::{debug, info};

use crate::config::{DEFAULT_REMOTE, EXPECTED_REPOSITORY_PATTERN};
use crate::error::{Error, Result};
use crate::runner::CommandRunner;

static EXPECTED_REPOSITORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(EXPECTED_REPOSITORY_PATTERN).expect("repository pattern is valid")
});

/// Source of version-control remote metadata
pub trait RepositoryInspector {
    /// Raw remote listing, one `name url (kind)` entry per line
    fn remote_lines(&self) -> Result<Vec<String>>;
}

/// [`RepositoryInspector`] that asks git about a working directory
pub struct GitInspector<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    working_dir: Option<Utf8PathBuf>,
}

impl<'a, R: CommandRunner + ?Sized> GitInspector<'a, R> {
    /// Inspect the process working directory
    pub fn new(runner: &'a R) -> Self {
        Self {
            runner,
            working_dir: None,
        }
    }

    /// Inspect a specific directory
    pub fn in_dir(runner: &'a R, working_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            runner,
            working_dir: Some(working_dir.into()),
        }
    }
}

impl<R: CommandRunner + ?Sized> RepositoryInspector for GitInspector<'_, R> {
    fn remote_lines(&self) -> Result<Vec<String>> {
        debug!("Listing remotes");

        let output = self
            .runner
            .run("git", &["remote", "-v"], self.working_dir.as_deref())
            .map_err(|e| Error::repository_not_found(format!("failed to run git: {}", e)))?;

        if !output.success {
            return Err(Error::repository_not_found(format!(
                "failed to list remotes: {}",
                output.stderr.trim()
            )));
        }

        Ok(output.stdout.lines().map(str::to_string).collect())
    }
}

/// Whether a single remote line names `origin` and points at the template
pub fn is_template_remote(line: &str) -> bool {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), Some(url)) => name == DEFAULT_REMOTE && EXPECTED_REPOSITORY_RE.is_match(url),
        _ => false,
    }
}

/// Lines of a remote listing that identify the template upstream
pub fn matching_remotes<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| is_template_remote(l))
        .collect()
}

/// Checks the repository's origin remote
pub struct ProvenanceGate<'a, I: RepositoryInspector + ?Sized> {
    inspector: &'a I,
}

impl<'a, I: RepositoryInspector + ?Sized> ProvenanceGate<'a, I> {
    /// Create a new provenance gate
    pub fn new(inspector: &'a I) -> Self {
        Self { inspector }
    }

    /// Pass when at least one origin remote matches the template repository.
    ///
    /// Returns the first matching remote line.
    pub fn run(&self) -> Result<String> {
        let lines = self.inspector.remote_lines()?;
        let matches = matching_remotes(&lines);

        match matches.first() {
            Some(line) => {
                info!("Template remote confirmed: {}", line);
                Ok((*line).to_string())
            }
            None if lines.iter().all(|l| l.trim().is_empty()) => {
                Err(Error::repository_not_found("no remotes configured"))
            }
            None => Err(Error::repository_not_found(format!(
                "no '{}' remote points at the CookieScript repository",
                DEFAULT_REMOTE
            ))),
        }
    }
}

/// Convenience for checking a directory with a real git
pub fn check_directory<R: CommandRunner + ?Sized>(runner: &R, dir: &Utf8Path) -> Result<String> {
    let inspector = GitInspector::in_dir(runner, dir);
    ProvenanceGate::new(&inspector).run()
}
