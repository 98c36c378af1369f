//! Dependency install

use camino::Utf8Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::manager::PackageManager;
use crate::runner::{CommandOutput, CommandRunner};

/// Lines of stderr kept in an install failure report
const STDERR_TAIL_LINES: usize = 20;

/// Runs `<manager> install` in the target directory
pub struct DependencyInstall<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> DependencyInstall<'a, R> {
    /// Create a new install step
    pub fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Install dependencies, blocking until the package manager exits.
    ///
    /// Passes only when the process launched and exited successfully.
    pub fn run(&self, manager: PackageManager, dir: &Utf8Path) -> Result<CommandOutput> {
        info!("Installing dependencies with {} in {}", manager, dir);

        let output = self
            .runner
            .run(manager.command(), manager.install_args(), Some(dir))
            .map_err(|e| {
                Error::install_failed(manager, format!("failed to run {}: {}", manager, e))
            })?;

        if !output.success {
            debug!("{} install exited with {:?}", manager, output.code);
            let mut detail = output.stderr_tail(STDERR_TAIL_LINES);
            if detail.is_empty() {
                detail = format!("{} install exited with {:?}", manager, output.code);
            }
            return Err(Error::install_failed(manager, detail));
        }

        info!("Dependencies installed");
        Ok(output)
    }
}
