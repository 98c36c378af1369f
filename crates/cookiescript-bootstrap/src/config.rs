//! Bootstrap configuration
//!
//! [`BootstrapConfig`] is built once from parsed arguments and handed by
//! reference to every step. Minimum tool versions come from built-in defaults,
//! optionally overridden by the `engines` field of a package.json.

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use semver::Version;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::manager::{ManagerRole, PackageManager};
use crate::version::normalize_version;

/// Files that belong to the template's own meta-project
pub const CLEANUP_FILES: &[&str] = &[
    "CHANGELOG.md",
    "CODE_OF_CONDUCT.md",
    "LICENSE.md",
    "README.md",
    "travis.yml",
];

/// Pattern a remote URL must match to count as the template upstream
pub const EXPECTED_REPOSITORY_PATTERN: &str = r"getspooky/CookieScript\.git";

/// Remote name inspected by the provenance gate
pub const DEFAULT_REMOTE: &str = "origin";

/// Default minimum npm version
pub const DEFAULT_NPM_MINIMUM: &str = "6.0.0";

/// Default minimum yarn version
pub const DEFAULT_YARN_MINIMUM: &str = "1.0.0";

/// Manifest file looked up in the target directory
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Immutable input of a bootstrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    target_directory: Utf8PathBuf,
    use_alternate_package_manager: bool,
}

impl BootstrapConfig {
    /// Create a new config
    pub fn new(
        target_directory: impl Into<Utf8PathBuf>,
        use_alternate_package_manager: bool,
    ) -> Self {
        Self {
            target_directory: target_directory.into(),
            use_alternate_package_manager,
        }
    }

    /// Directory being scaffolded
    pub fn target_directory(&self) -> &Utf8Path {
        &self.target_directory
    }

    /// Whether the alternate manager (yarn) was selected
    pub fn use_alternate_package_manager(&self) -> bool {
        self.use_alternate_package_manager
    }

    /// Manager used for the install step
    pub fn selected_manager(&self) -> PackageManager {
        PackageManager::select(self.use_alternate_package_manager)
    }

    /// Managers whose versions are checked, in order.
    ///
    /// The primary manager is only checked when it is selected; the alternate
    /// manager is always checked.
    pub fn managers_to_check(&self) -> Vec<PackageManager> {
        let selected = self.selected_manager();
        PackageManager::ALL
            .into_iter()
            .filter(|m| m.role() == ManagerRole::Alternate || *m == selected)
            .collect()
    }
}

/// Minimum version a tool must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement {
    /// Tool the requirement applies to
    pub tool: PackageManager,
    /// Lowest accepted version (inclusive)
    pub minimum_version: Version,
}

impl VersionRequirement {
    /// Create a requirement from a version-ish string such as `>=6.0.0`
    pub fn parse(tool: PackageManager, value: &str) -> Result<Self> {
        let minimum_version =
            parse_minimum(value).ok_or_else(|| Error::invalid_engines(tool, value))?;
        Ok(Self {
            tool,
            minimum_version,
        })
    }

    /// Whether `installed` satisfies this requirement
    pub fn is_satisfied_by(&self, installed: &Version) -> bool {
        installed >= &self.minimum_version
    }
}

/// Version requirements for both package managers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    npm: VersionRequirement,
    yarn: VersionRequirement,
}

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    engines: BTreeMap<String, String>,
}

impl Requirements {
    /// Built-in requirements
    pub fn defaults() -> Self {
        Self {
            npm: VersionRequirement {
                tool: PackageManager::Npm,
                minimum_version: Version::new(6, 0, 0),
            },
            yarn: VersionRequirement {
                tool: PackageManager::Yarn,
                minimum_version: Version::new(1, 0, 0),
            },
        }
    }

    /// Create requirements from explicit values
    pub fn new(npm: VersionRequirement, yarn: VersionRequirement) -> Self {
        Self { npm, yarn }
    }

    /// Requirement for a given tool
    pub fn for_tool(&self, tool: PackageManager) -> &VersionRequirement {
        match tool {
            PackageManager::Npm => &self.npm,
            PackageManager::Yarn => &self.yarn,
        }
    }

    /// Apply an `engines` map on top of the defaults.
    ///
    /// Unknown keys are ignored. Wildcard ranges (`*`, `x`, empty) accept any
    /// version, so the built-in minimum stays in force for them.
    pub fn from_engines(engines: &BTreeMap<String, String>) -> Result<Self> {
        let mut requirements = Self::defaults();
        for tool in PackageManager::ALL {
            if let Some(value) = engines.get(tool.engines_key()) {
                if is_wildcard(value) {
                    debug!(
                        "engines.{} = '{}' is unconstrained, keeping default",
                        tool.engines_key(),
                        value
                    );
                    continue;
                }
                let requirement = VersionRequirement::parse(tool, value)?;
                debug!(
                    "engines.{} = '{}' -> >= {}",
                    tool.engines_key(),
                    value,
                    requirement.minimum_version
                );
                match tool {
                    PackageManager::Npm => requirements.npm = requirement,
                    PackageManager::Yarn => requirements.yarn = requirement,
                }
            }
        }
        Ok(requirements)
    }

    /// Load requirements from a package.json
    pub fn from_manifest(path: &Utf8Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_owned(),
            source,
        })?;
        let manifest: PackageManifest =
            serde_json::from_str(&content).map_err(|source| Error::ManifestParse {
                path: path.to_owned(),
                source,
            })?;
        Self::from_engines(&manifest.engines)
    }

    /// Resolve requirements for a run.
    ///
    /// An explicit manifest must exist. Without one, `<target>/package.json`
    /// is used when present, and the defaults otherwise. Returns the manifest
    /// that was read, if any.
    pub fn resolve(
        explicit: Option<&Utf8Path>,
        target_directory: &Utf8Path,
    ) -> Result<(Self, Option<Utf8PathBuf>)> {
        if let Some(path) = explicit {
            info!("Loading engines from {}", path);
            return Ok((Self::from_manifest(path)?, Some(path.to_owned())));
        }

        let candidate = target_directory.join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            info!("Loading engines from {}", candidate);
            let requirements = Self::from_manifest(&candidate)?;
            return Ok((requirements, Some(candidate)));
        }

        debug!("No engines manifest found, using built-in requirements");
        Ok((Self::defaults(), None))
    }
}

impl Default for Requirements {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Reduce an engines constraint to its minimum version.
///
/// Leading `>=`, `>`, `^`, `~` and `=` operators are dropped and only the
/// first comparator of a range is considered.
fn parse_minimum(value: &str) -> Option<Version> {
    let first = value.split("||").next()?.trim();
    let stripped = first
        .trim_start_matches(['>', '=', '^', '~'])
        .split_whitespace()
        .next()?;
    normalize_version(stripped)
}

/// Whether a range matches every version (`*`, `x`, `X.x`, or empty)
fn is_wildcard(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || value
            .split('.')
            .all(|part| matches!(part.trim(), "*" | "x" | "X"))
}
