//! Terminal output utilities

use console::style;
use cookiescript_bootstrap::{Error as BootstrapError, ErrorKind};
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), style(msg).yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a dimmed detail line below a message
pub fn detail(msg: &str) {
    for line in msg.lines() {
        eprintln!("    {}", style(line).dim());
    }
}

/// Report a failed bootstrap step.
///
/// Version problems are warnings; every other failure is an error.
pub fn failure(err: &BootstrapError) {
    println!();
    match err.kind() {
        ErrorKind::ToolVersion => warning(&err.to_string()),
        _ => error(&err.to_string()),
    }
    if let Some(text) = err.detail() {
        detail(text);
    }
}

/// Print the missing-argument message with usage examples
pub fn usage_error(program: &str) {
    eprintln!("Please specify the project directory:");
    println!(
        "  {} {}",
        style(program).cyan(),
        style("<project-directory>").green()
    );
    println!();
    println!("For example:");
    println!("  {} {}", style(program).cyan(), style("my-app").green());
    println!();
    println!(
        "Run {} to see all options.",
        style(format!("{} --help", program)).cyan()
    );
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
