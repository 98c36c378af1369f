//! CLI argument parsing with clap

use std::collections::HashSet;
use std::ffi::OsString;

use camino::Utf8PathBuf;
use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser};

/// Line printed after the generated help text
pub const HELP_FOOTER: &str = " Only <project-directory> is required.";

/// Create a new CookieScript app from a cloned template
#[derive(Parser, Debug)]
#[command(name = "create-cookiescript")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "create-cookiescript <project-directory> [options]")]
#[command(after_help = HELP_FOOTER)]
pub struct Cli {
    /// Directory of the cloned CookieScript template
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<Utf8PathBuf>,

    /// Extra positional arguments, accepted and ignored
    #[arg(value_name = "args", hide = true)]
    pub extra_args: Vec<String>,

    /// Install dependencies with npm instead of yarn
    #[arg(long = "use-npm", visible_alias = "use-primary-manager")]
    pub use_npm: bool,

    /// package.json whose `engines` field sets the minimum npm/yarn versions
    #[arg(long, value_name = "PATH", env = "COOKIESCRIPT_ENGINES")]
    pub engines: Option<Utf8PathBuf>,

    /// Exit with 0 on every bootstrap failure, as older releases did
    #[arg(
        long,
        env = "COOKIESCRIPT_LEGACY_EXIT_CODES",
        value_parser = FalseyValueParser::new()
    )]
    pub legacy_exit_codes: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Whether the alternate package manager (yarn) is selected
    pub fn use_alternate_package_manager(&self) -> bool {
        !self.use_npm
    }
}

/// Process arguments with unknown flags removed
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LenientArgs {
    /// Arguments to hand to clap, program name first
    pub args: Vec<OsString>,
    /// Flags that were dropped
    pub ignored: Vec<String>,
}

/// Drop flags clap does not know about so they are tolerated instead of
/// rejected.
///
/// An unknown flag without an inline `=value` also swallows the following
/// token when that token is not itself a flag, so `--template typescript` is
/// dropped as a pair. Known letters of a mixed short cluster such as `-vx`
/// are kept. Everything after `--` is passed through untouched.
pub fn retain_known_flags<I, T>(args: I) -> LenientArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let mut longs: HashSet<String> = HashSet::from(["help".to_string(), "version".to_string()]);
    let mut shorts: HashSet<char> = HashSet::from(['h', 'V']);
    for arg in command.get_arguments() {
        if let Some(long) = arg.get_long() {
            longs.insert(long.to_string());
        }
        if let Some(aliases) = arg.get_all_aliases() {
            longs.extend(aliases.into_iter().map(str::to_string));
        }
        if let Some(short) = arg.get_short() {
            shorts.insert(short);
        }
    }

    let mut result = LenientArgs::default();
    let mut iter = args.into_iter().map(Into::into).peekable();
    if let Some(program) = iter.next() {
        result.args.push(program);
    }

    let mut passthrough = false;
    while let Some(arg) = iter.next() {
        let text = arg.to_string_lossy().into_owned();
        if passthrough || !is_flag(&text) {
            result.args.push(arg);
            continue;
        }
        if text == "--" {
            passthrough = true;
            result.args.push(arg);
            continue;
        }

        match classify(&text, &longs, &shorts) {
            Flag::Known => result.args.push(arg),
            Flag::Mixed { kept, dropped } => {
                result.args.push(kept.into());
                result.ignored.push(dropped);
            }
            Flag::Unknown { takes_value } => {
                result.ignored.push(text);
                if takes_value {
                    if let Some(value) = iter.next_if(|next| !is_flag(&next.to_string_lossy())) {
                        result.ignored.push(value.to_string_lossy().into_owned());
                    }
                }
            }
        }
    }

    result
}

/// How a single flag token relates to the known flag set
#[derive(Debug, PartialEq, Eq)]
enum Flag {
    Known,
    /// Short cluster with both known and unknown letters
    Mixed { kept: String, dropped: String },
    /// Not recognised; `takes_value` when it may own the next token
    Unknown { takes_value: bool },
}

fn is_flag(text: &str) -> bool {
    text.starts_with('-') && text != "-"
}

fn classify(text: &str, longs: &HashSet<String>, shorts: &HashSet<char>) -> Flag {
    if let Some(long) = text.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        return if longs.contains(name) {
            Flag::Known
        } else {
            Flag::Unknown {
                takes_value: !inline_value,
            }
        };
    }

    let letters = &text[1..];
    let (known, unknown): (String, String) = letters.chars().partition(|c| shorts.contains(c));
    match (known.is_empty(), unknown.is_empty()) {
        (_, true) => Flag::Known,
        (true, false) => Flag::Unknown {
            takes_value: letters.chars().count() == 1,
        },
        (false, false) => Flag::Mixed {
            kept: format!("-{}", known),
            dropped: format!("-{}", unknown),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(args: &[&str]) -> LenientArgs {
        retain_known_flags(args.iter().copied())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_unknown_flags_are_dropped() {
        let result = lenient(&[
            "create-cookiescript",
            "my-app",
            "--typescript=yes",
            "-x",
            "--use-npm",
        ]);
        assert_eq!(
            result.args,
            os(&["create-cookiescript", "my-app", "--use-npm"])
        );
        assert_eq!(result.ignored, vec!["--typescript=yes", "-x"]);
    }

    #[test]
    fn test_unknown_flag_swallows_its_value() {
        let result = lenient(&["create-cookiescript", "my-app", "--template", "typescript"]);
        assert_eq!(result.args, os(&["create-cookiescript", "my-app"]));
        assert_eq!(result.ignored, vec!["--template", "typescript"]);

        let cli = Cli::try_parse_from(result.args).unwrap();
        assert_eq!(
            cli.project_directory.as_deref().map(|p| p.as_str()),
            Some("my-app")
        );
    }

    #[test]
    fn test_unknown_flag_leaves_following_flag() {
        let result = lenient(&["create-cookiescript", "my-app", "--template", "--use-npm"]);
        assert_eq!(
            result.args,
            os(&["create-cookiescript", "my-app", "--use-npm"])
        );
        assert_eq!(result.ignored, vec!["--template"]);
    }

    #[test]
    fn test_mixed_short_cluster_keeps_known_letters() {
        let result = lenient(&["create-cookiescript", "my-app", "-vx"]);
        assert_eq!(result.args, os(&["create-cookiescript", "my-app", "-v"]));
        assert_eq!(result.ignored, vec!["-x"]);

        let cli = Cli::try_parse_from(result.args).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_extra_positionals_are_accepted() {
        let cli = Cli::try_parse_from(["create-cookiescript", "my-app", "typescript", "extra"])
            .unwrap();
        assert_eq!(
            cli.project_directory.as_deref().map(|p| p.as_str()),
            Some("my-app")
        );
        assert_eq!(cli.extra_args, vec!["typescript", "extra"]);
    }

    #[test]
    fn test_known_forms_are_kept() {
        let result = lenient(&[
            "create-cookiescript",
            "-vv",
            "--engines=package.json",
            "--use-primary-manager",
            "-",
        ]);
        assert!(result.ignored.is_empty());
        assert_eq!(result.args.len(), 5);
    }

    #[test]
    fn test_passthrough_after_double_dash() {
        let result = lenient(&["create-cookiescript", "--", "--weird-dir"]);
        assert!(result.ignored.is_empty());
        let cli = Cli::parse_from(result.args);
        assert_eq!(
            cli.project_directory.as_deref().map(|p| p.as_str()),
            Some("--weird-dir")
        );
    }

    #[test]
    fn test_default_selects_yarn() {
        let cli = Cli::parse_from(["create-cookiescript", "my-app"]);
        assert!(cli.use_alternate_package_manager());
        assert!(!cli.legacy_exit_codes);

        let cli = Cli::parse_from(["create-cookiescript", "my-app", "--use-npm"]);
        assert!(!cli.use_alternate_package_manager());
    }

    #[test]
    fn test_project_directory_is_optional_for_clap() {
        let cli = Cli::parse_from(lenient(&["create-cookiescript", "--foo"]).args);
        assert!(cli.project_directory.is_none());
    }
}
