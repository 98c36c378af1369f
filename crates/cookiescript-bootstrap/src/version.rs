//! Version gate
//!
//! Queries each required package manager for its version and compares it
//! with the declared minimum using semantic-version ordering.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use tracing::debug;

use crate::config::{BootstrapConfig, Requirements};
use crate::error::{Error, Result};
use crate::manager::PackageManager;
use crate::runner::CommandRunner;

/// Pre-compiled regex for extracting version numbers from command output
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+(?:\.\d+){0,2}(?:-[0-9A-Za-z.-]+)?)").expect("version regex is valid")
});

/// Anchored form used to normalise a lone version token
static VERSION_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(-[0-9A-Za-z.-]+)?$")
        .expect("version token regex is valid")
});

/// Turn `6`, `6.1`, `v6.1.2` or `6.1.2-beta.1` into a full semantic version.
///
/// Missing minor/patch segments are padded with zero.
pub fn normalize_version(token: &str) -> Option<Version> {
    let caps = VERSION_TOKEN_RE.captures(token.trim())?;
    let major = caps.get(1)?.as_str();
    let minor = caps.get(2).map_or("0", |m| m.as_str());
    let patch = caps.get(3).map_or("0", |m| m.as_str());
    let pre = caps.get(4).map_or("", |m| m.as_str());
    Version::parse(&format!("{}.{}.{}{}", major, minor, patch, pre)).ok()
}

/// Find the first version in free-form command output.
///
/// Handles `6.14.4`, `v1.22.19`, `npm 10.2.5` and multi-line output where the
/// version is on the first line containing digits.
pub fn extract_version(text: &str) -> Option<Version> {
    VERSION_RE
        .captures(text.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| normalize_version(m.as_str()))
}

/// A tool that passed the version gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    /// The tool that was checked
    pub tool: PackageManager,
    /// Version reported by the tool
    pub found: Version,
    /// Minimum it was compared against
    pub required: Version,
}

/// Checks installed package manager versions
pub struct VersionGate<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    requirements: &'a Requirements,
}

impl<'a, R: CommandRunner + ?Sized> VersionGate<'a, R> {
    /// Create a new version gate
    pub fn new(runner: &'a R, requirements: &'a Requirements) -> Self {
        Self {
            runner,
            requirements,
        }
    }

    /// Check a single tool against its requirement
    pub fn check(&self, tool: PackageManager) -> Result<ToolCheck> {
        let requirement = self.requirements.for_tool(tool);

        if !self.runner.is_available(tool.command()) {
            debug!("{} not found in PATH", tool);
            return Err(Error::tool_not_found(tool));
        }

        let found = self.installed_version(tool)?;
        debug!(
            "{} version {} (required >= {})",
            tool, found, requirement.minimum_version
        );

        if !requirement.is_satisfied_by(&found) {
            return Err(Error::version_too_old(
                tool,
                requirement.minimum_version.to_string(),
                found.to_string(),
            ));
        }

        Ok(ToolCheck {
            tool,
            found,
            required: requirement.minimum_version.clone(),
        })
    }

    /// Check every tool the config requires, stopping at the first failure
    pub fn run(&self, config: &BootstrapConfig) -> Result<Vec<ToolCheck>> {
        config
            .managers_to_check()
            .into_iter()
            .map(|tool| self.check(tool))
            .collect()
    }

    /// Run `<tool> --version` and parse its output
    fn installed_version(&self, tool: PackageManager) -> Result<Version> {
        let output = self
            .runner
            .run(tool.command(), &[tool.version_flag()], None)
            .map_err(|e| Error::version_command_failed(tool, e.to_string()))?;

        if !output.success {
            let message = match output.stderr.trim() {
                "" => format!("exited with status {:?}", output.code),
                stderr => stderr.to_string(),
            };
            return Err(Error::version_command_failed(tool, message));
        }

        let text = output.text().trim();
        extract_version(text).ok_or_else(|| Error::unparsable_version(tool, text))
    }
}
