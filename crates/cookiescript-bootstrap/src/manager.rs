//! Package manager definitions
//!
//! The scaffolder supports two interchangeable JavaScript package managers.
//! npm is the primary manager and yarn the alternate one; the CLI selects the
//! alternate manager unless told otherwise.

/// A JavaScript package manager the bootstrap sequence can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// npm (primary)
    Npm,
    /// Yarn (alternate)
    Yarn,
}

/// Role a package manager plays in the bootstrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerRole {
    /// Checked only when selected
    Primary,
    /// Always checked
    Alternate,
}

impl PackageManager {
    /// Both managers, primary first
    pub const ALL: [PackageManager; 2] = [PackageManager::Npm, PackageManager::Yarn];

    /// The manager selected by the `use_alternate` flag
    pub fn select(use_alternate: bool) -> Self {
        if use_alternate {
            Self::Yarn
        } else {
            Self::Npm
        }
    }

    /// Role of this manager
    pub fn role(&self) -> ManagerRole {
        match self {
            Self::Npm => ManagerRole::Primary,
            Self::Yarn => ManagerRole::Alternate,
        }
    }

    /// Executable name
    pub fn command(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Npm => "Npm",
            Self::Yarn => "Yarn",
        }
    }

    /// Flag printing the installed version
    pub fn version_flag(&self) -> &'static str {
        "--version"
    }

    /// Arguments of the install command
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Key of this manager in a package.json `engines` object
    pub fn engines_key(&self) -> &'static str {
        self.command()
    }

    /// Command that starts the development server
    pub fn start_hint(&self) -> String {
        format!("{} start", self.command())
    }

    /// Command that runs the test suite
    pub fn test_hint(&self) -> String {
        format!("{} test", self.command())
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command())
    }
}
