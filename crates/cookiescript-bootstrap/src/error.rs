//! Error types for cookiescript-bootstrap

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::manager::PackageManager;

/// Result type alias using cookiescript-bootstrap's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Bootstrap error types
#[derive(Error, Debug)]
pub enum Error {
    /// Package manager executable is not on PATH
    #[error("{tool} is not installed or not in PATH")]
    ToolNotFound { tool: PackageManager },

    /// `<tool> --version` could not be run or exited unsuccessfully
    #[error("Failed to query {tool} version: {message}")]
    VersionCommandFailed {
        tool: PackageManager,
        message: String,
    },

    /// Version output did not contain a semantic version
    #[error("Could not parse {tool} version from output: '{output}'")]
    UnparsableVersion { tool: PackageManager, output: String },

    /// Installed version is below the declared minimum
    #[error("You need {tool} v{required} or above but you have v{found}")]
    VersionTooOld {
        tool: PackageManager,
        required: String,
        found: String,
    },

    /// The working repository is not a clone of the template
    #[error("CookieScript repository not found")]
    RepositoryNotFound { detail: String },

    /// Directory enumeration or deletion failed
    #[error("Filesystem operation failed on {path}: {source}")]
    Filesystem {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dependency install command failed
    #[error("Something went wrong during installation")]
    InstallFailed {
        manager: PackageManager,
        detail: String,
    },

    /// An engines entry is not a usable version
    #[error("Invalid engines constraint for {tool}: '{value}'")]
    InvalidEngines { tool: PackageManager, value: String },

    /// Engines manifest could not be read
    #[error("Failed to read engines manifest {path}: {source}")]
    ManifestRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Engines manifest is not valid JSON
    #[error("Failed to parse engines manifest {path}: {source}")]
    ManifestParse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure categories surfaced to the caller.
///
/// Every [`Error`] belongs to exactly one kind; the binary maps kinds to
/// process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A package manager is missing or below its minimum version
    ToolVersion,
    /// The working repository does not point at the template upstream
    Provenance,
    /// Directory enumeration or deletion failed
    Filesystem,
    /// Dependency installation failed
    Install,
    /// Engines manifest or path configuration is unusable
    Config,
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolNotFound { .. }
            | Self::VersionCommandFailed { .. }
            | Self::UnparsableVersion { .. }
            | Self::VersionTooOld { .. } => ErrorKind::ToolVersion,
            Self::RepositoryNotFound { .. } => ErrorKind::Provenance,
            Self::Filesystem { .. } => ErrorKind::Filesystem,
            Self::InstallFailed { .. } => ErrorKind::Install,
            Self::InvalidEngines { .. }
            | Self::ManifestRead { .. }
            | Self::ManifestParse { .. } => ErrorKind::Config,
        }
    }

    /// Extra context worth showing under the main message, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::RepositoryNotFound { detail } | Self::InstallFailed { detail, .. } => {
                Some(detail.as_str()).filter(|d| !d.is_empty())
            }
            _ => None,
        }
    }

    /// Create a tool not found error
    pub fn tool_not_found(tool: PackageManager) -> Self {
        Self::ToolNotFound { tool }
    }

    /// Create a version command failed error
    pub fn version_command_failed(tool: PackageManager, message: impl Into<String>) -> Self {
        Self::VersionCommandFailed {
            tool,
            message: message.into(),
        }
    }

    /// Create an unparsable version error
    pub fn unparsable_version(tool: PackageManager, output: impl Into<String>) -> Self {
        Self::UnparsableVersion {
            tool,
            output: output.into(),
        }
    }

    /// Create a version too old error
    pub fn version_too_old(
        tool: PackageManager,
        required: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::VersionTooOld {
            tool,
            required: required.into(),
            found: found.into(),
        }
    }

    /// Create a repository not found error
    pub fn repository_not_found(detail: impl Into<String>) -> Self {
        Self::RepositoryNotFound {
            detail: detail.into(),
        }
    }

    /// Create a filesystem error
    pub fn filesystem(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create an install failed error
    pub fn install_failed(manager: PackageManager, detail: impl Into<String>) -> Self {
        Self::InstallFailed {
            manager,
            detail: detail.into(),
        }
    }

    /// Create an invalid engines error
    pub fn invalid_engines(tool: PackageManager, value: impl Into<String>) -> Self {
        Self::InvalidEngines {
            tool,
            value: value.into(),
        }
    }
}
