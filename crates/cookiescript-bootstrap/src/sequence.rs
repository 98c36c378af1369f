//! Bootstrap sequence
//!
//! Runs the four steps in strict order: version gate, provenance gate,
//! template cleanup, dependency install. The first failing step ends the run;
//! nothing after it executes and nothing before it is rolled back.

use camino::Utf8PathBuf;
use tracing::{debug, info};

use crate::cleanup::{CleanupReport, TemplateCleanup};
use crate::config::{BootstrapConfig, Requirements, CLEANUP_FILES};
use crate::error::Result;
use crate::install::DependencyInstall;
use crate::manager::PackageManager;
use crate::provenance::{ProvenanceGate, RepositoryInspector};
use crate::runner::CommandRunner;
use crate::version::{ToolCheck, VersionGate};

/// Steps of the bootstrap sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Package manager versions
    VersionGate,
    /// Origin remote matches the template
    ProvenanceGate,
    /// Template-only files removed
    TemplateCleanup,
    /// Dependencies installed
    DependencyInstall,
}

impl Step {
    /// Display name of the step
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VersionGate => "version check",
            Self::ProvenanceGate => "repository check",
            Self::TemplateCleanup => "template cleanup",
            Self::DependencyInstall => "dependency install",
        }
    }
}

/// Observer for bootstrap progress.
///
/// All methods have empty defaults so implementors only override what they
/// render.
pub trait BootstrapObserver {
    /// Called before a step starts
    fn on_step_start(&self, _step: Step) {}

    /// Called after each tool passes the version gate
    fn on_tool_checked(&self, _check: &ToolCheck) {}

    /// Called once the template remote is confirmed
    fn on_provenance_confirmed(&self, _remote: &str) {}

    /// Called after template files were removed
    fn on_cleanup_done(&self, _report: &CleanupReport) {}

    /// Called after dependencies were installed
    fn on_install_done(&self, _manager: PackageManager) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BootstrapObserver for NoopObserver {}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Directory that was bootstrapped
    pub target_directory: Utf8PathBuf,
    /// Manager used to install dependencies
    pub manager: PackageManager,
    /// Tools that passed the version gate
    pub tools: Vec<ToolCheck>,
    /// Remote line that confirmed provenance
    pub remote: String,
    /// Names removed by template cleanup
    pub removed: Vec<String>,
}

/// The ordered bootstrap pipeline
pub struct BootstrapSequence<'a> {
    runner: &'a dyn CommandRunner,
    inspector: &'a dyn RepositoryInspector,
    requirements: Requirements,
    cleanup: TemplateCleanup,
}

impl<'a> BootstrapSequence<'a> {
    /// Create a sequence using the built-in cleanup file set
    pub fn new(
        runner: &'a dyn CommandRunner,
        inspector: &'a dyn RepositoryInspector,
        requirements: Requirements,
    ) -> Self {
        Self {
            runner,
            inspector,
            requirements,
            cleanup: TemplateCleanup::new(CLEANUP_FILES.iter().copied()),
        }
    }

    /// Replace the cleanup file set
    pub fn with_cleanup(mut self, cleanup: TemplateCleanup) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Run every step in order, stopping at the first failure
    pub fn run(
        &self,
        config: &BootstrapConfig,
        observer: &dyn BootstrapObserver,
    ) -> Result<Completion> {
        let target = config.target_directory();
        info!("Bootstrapping {}", target);

        observer.on_step_start(Step::VersionGate);
        let tools = VersionGate::new(self.runner, &self.requirements).run(config)?;
        for check in &tools {
            observer.on_tool_checked(check);
        }

        observer.on_step_start(Step::ProvenanceGate);
        let remote = ProvenanceGate::new(self.inspector).run()?;
        observer.on_provenance_confirmed(&remote);

        observer.on_step_start(Step::TemplateCleanup);
        let report = self.cleanup.run(target)?;
        observer.on_cleanup_done(&report);

        observer.on_step_start(Step::DependencyInstall);
        let manager = config.selected_manager();
        DependencyInstall::new(self.runner).run(manager, target)?;
        observer.on_install_done(manager);

        debug!("Bootstrap of {} complete", target);
        Ok(Completion {
            target_directory: target.to_owned(),
            manager,
            tools,
            remote,
            removed: report.removed,
        })
    }
}
