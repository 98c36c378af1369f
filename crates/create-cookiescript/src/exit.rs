//! Process exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | usage error, or an unexpected failure |
//! | 2 | package manager missing or too old |
//! | 3 | repository is not a CookieScript clone |
//! | 4 | dependency install failed |
//! | 5 | filesystem failure during cleanup |
//! | 6 | invalid engines manifest |
//!
//! With `--legacy-exit-codes`, version, repository and install failures exit
//! with 0 and filesystem/configuration failures with 1.

use cookiescript_bootstrap::{Error as BootstrapError, ErrorKind};

pub const SUCCESS: u8 = 0;
pub const USAGE: u8 = 1;
pub const UNEXPECTED: u8 = 1;
pub const TOOL_VERSION: u8 = 2;
pub const PROVENANCE: u8 = 3;
pub const INSTALL: u8 = 4;
pub const FILESYSTEM: u8 = 5;
pub const CONFIG: u8 = 6;

/// How failures are mapped to exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// One code per failure kind
    #[default]
    Distinct,
    /// Historical behaviour: gate failures exit 0
    Legacy,
}

impl ExitPolicy {
    /// Policy selected by the `--legacy-exit-codes` flag
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            Self::Legacy
        } else {
            Self::Distinct
        }
    }

    /// Exit code for a failure kind
    pub fn code_for(&self, kind: ErrorKind) -> u8 {
        match (self, kind) {
            (Self::Distinct, ErrorKind::ToolVersion) => TOOL_VERSION,
            (Self::Distinct, ErrorKind::Provenance) => PROVENANCE,
            (Self::Distinct, ErrorKind::Install) => INSTALL,
            (Self::Distinct, ErrorKind::Filesystem) => FILESYSTEM,
            (Self::Distinct, ErrorKind::Config) => CONFIG,
            (Self::Legacy, ErrorKind::ToolVersion | ErrorKind::Provenance | ErrorKind::Install) => {
                SUCCESS
            }
            (Self::Legacy, ErrorKind::Filesystem | ErrorKind::Config) => UNEXPECTED,
        }
    }

    /// Exit code for an error returned by a command
    pub fn code_for_error(&self, err: &anyhow::Error) -> u8 {
        err.downcast_ref::<BootstrapError>()
            .map_or(UNEXPECTED, |e| self.code_for(e.kind()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookiescript_bootstrap::PackageManager;

    #[test]
    fn test_distinct_codes_are_unique() {
        let policy = ExitPolicy::Distinct;
        let kinds = [
            ErrorKind::ToolVersion,
            ErrorKind::Provenance,
            ErrorKind::Install,
            ErrorKind::Filesystem,
            ErrorKind::Config,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| policy.code_for(*k)).collect();
        codes.push(USAGE);
        codes.push(SUCCESS);
        let count = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), count);
    }

    #[test]
    fn test_legacy_gate_failures_exit_zero() {
        let policy = ExitPolicy::from_legacy_flag(true);
        assert_eq!(policy.code_for(ErrorKind::ToolVersion), 0);
        assert_eq!(policy.code_for(ErrorKind::Provenance), 0);
        assert_eq!(policy.code_for(ErrorKind::Install), 0);
        assert_eq!(policy.code_for(ErrorKind::Filesystem), 1);
    }

    #[test]
    fn test_code_for_error_downcasts() {
        let policy = ExitPolicy::Distinct;
        let err = anyhow::Error::new(BootstrapError::install_failed(PackageManager::Yarn, ""));
        assert_eq!(policy.code_for_error(&err), INSTALL);

        let err = anyhow::anyhow!("something else");
        assert_eq!(policy.code_for_error(&err), UNEXPECTED);
    }
}
