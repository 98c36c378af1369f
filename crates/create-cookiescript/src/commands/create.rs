//! Bootstrap a cloned CookieScript template

use std::cell::RefCell;

use anyhow::Result;
use camino::Utf8PathBuf;
use cookiescript_bootstrap::{
    BootstrapConfig, BootstrapObserver, BootstrapSequence, CleanupReport, Completion,
    GitInspector, PackageManager, Requirements, Step, SystemRunner, ToolCheck,
};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use crate::output;

const INSTALL_MESSAGE: &str = "Installing packages. This might take a couple of minutes.";

/// Arguments of a create run
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Directory being bootstrapped
    pub directory: Utf8PathBuf,
    /// Install with yarn rather than npm
    pub use_alternate_package_manager: bool,
    /// Explicit engines manifest
    pub engines: Option<Utf8PathBuf>,
}

/// Run the bootstrap sequence against the real toolchain
pub fn run(args: &CreateArgs) -> Result<()> {
    println!(
        "Creating a new CookieScript app in {}.",
        args.directory.as_str().green()
    );

    let config =
        BootstrapConfig::new(args.directory.clone(), args.use_alternate_package_manager);

    let (requirements, source) =
        Requirements::resolve(args.engines.as_deref(), config.target_directory())?;
    if let Some(path) = source {
        output::info(&format!("Using engines from {}", path));
    }

    let runner = SystemRunner::new();
    let inspector = GitInspector::new(&runner);
    let observer = ConsoleObserver::default();

    let result =
        BootstrapSequence::new(&runner, &inspector, requirements).run(&config, &observer);
    observer.clear();

    let completion = result?;
    print_completion(&completion);
    Ok(())
}

/// Renders bootstrap progress to the terminal
#[derive(Default)]
struct ConsoleObserver {
    spinner: RefCell<Option<ProgressBar>>,
}

impl ConsoleObserver {
    /// Stop any running spinner
    fn clear(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl BootstrapObserver for ConsoleObserver {
    fn on_step_start(&self, step: Step) {
        match step {
            Step::TemplateCleanup => {
                println!();
                println!("{}", "Removing unnecessary files...".magenta());
            }
            Step::DependencyInstall => {
                println!();
                let pb = output::spinner(INSTALL_MESSAGE);
                *self.spinner.borrow_mut() = Some(pb);
            }
            Step::VersionGate | Step::ProvenanceGate => {}
        }
    }

    fn on_tool_checked(&self, check: &ToolCheck) {
        println!();
        output::success(&format!(
            "{} version compatible {}",
            check.tool.display_name(),
            format!("(v{})", check.found).dimmed()
        ));
    }

    fn on_provenance_confirmed(&self, _remote: &str) {
        println!();
        output::success("CookieScript repository found");
    }

    fn on_cleanup_done(&self, report: &CleanupReport) {
        for name in &report.removed {
            println!("  {} {}", "-".dimmed(), name.dimmed());
        }
    }

    fn on_install_done(&self, manager: PackageManager) {
        self.clear();
        output::success(&format!("Packages installed with {}", manager));
    }
}

fn print_completion(completion: &Completion) {
    let manager = completion.manager;

    println!();
    println!(
        "{}",
        format!("Success! App created at {}", completion.target_directory).green()
    );
    println!("Inside that directory, you can run several commands:");
    println!();
    println!("  {}", manager.start_hint().cyan());
    println!("    Starts the development server.");
    println!();
    println!("  {}", manager.test_hint().cyan());
    println!("    Starts the test runner.");
    println!();
    println!("We suggest that you begin by typing:");
    println!();
    println!("  {} {}", "cd".cyan(), completion.target_directory);
    println!("  {}", manager.start_hint().cyan());
    println!();
    println!("Happy Coding!");
}
