//! # cookiescript-bootstrap
//!
//! Bootstrap sequence for freshly cloned CookieScript projects:
//! - **Version gate**: npm / yarn meet their minimum versions
//! - **Provenance gate**: the `origin` remote points at the template repository
//! - **Template cleanup**: template-only files are removed from the target
//! - **Dependency install**: the selected package manager installs dependencies
//!
//! Subprocesses and repository inspection are injected through the
//! [`CommandRunner`] and [`RepositoryInspector`] traits.
//!
//! # Example
//!
//! ```no_run
//! use cookiescript_bootstrap::{
//!     BootstrapConfig, BootstrapSequence, GitInspector, NoopObserver, Requirements,
//!     SystemRunner,
//! };
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BootstrapConfig::new("my-app", true);
//! let runner = SystemRunner::new();
//! let inspector = GitInspector::new(&runner);
//! let (requirements, _) = Requirements::resolve(None, config.target_directory())?;
//!
//! let completion = BootstrapSequence::new(&runner, &inspector, requirements)
//!     .run(&config, &NoopObserver)?;
//! println!("Installed with {}", completion.manager);
//! # Ok(())
//! # }
//! ```

pub mod cleanup;
pub mod config;
pub mod error;
pub mod install;
pub mod manager;
pub mod provenance;
pub mod runner;
pub mod sequence;
pub mod version;

pub use cleanup::{CleanupReport, TemplateCleanup};
pub use config::{BootstrapConfig, Requirements, VersionRequirement, CLEANUP_FILES};
pub use error::{Error, ErrorKind, Result};
pub use install::DependencyInstall;
pub use manager::{ManagerRole, PackageManager};
pub use provenance::{GitInspector, ProvenanceGate, RepositoryInspector};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use sequence::{BootstrapObserver, BootstrapSequence, Completion, NoopObserver, Step};
pub use version::{ToolCheck, VersionGate};
