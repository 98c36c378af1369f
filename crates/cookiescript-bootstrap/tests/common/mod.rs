//! Shared test utilities for cookiescript-bootstrap integration tests
//!
//! Provides scripted stand-ins for subprocesses and repository metadata so the
//! bootstrap sequence can run without npm, yarn or git.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use cookiescript_bootstrap::{CommandOutput, CommandRunner, RepositoryInspector, Result};
use tempfile::TempDir;

/// Record of a command invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<Utf8PathBuf>,
}

impl Invocation {
    /// `program arg1 arg2` form, for assertions
    pub fn line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Scripted command runner
pub struct MockRunner {
    available: HashSet<String>,
    responses: HashMap<String, CommandOutput>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            available: HashSet::new(),
            responses: HashMap::new(),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Runner where npm and yarn report the given versions and install succeeds
    pub fn with_versions(npm: &str, yarn: &str) -> Self {
        Self::new()
            .tool("npm", npm)
            .tool("yarn", yarn)
            .respond("npm install", CommandOutput::ok("added 1 package"))
            .respond("yarn install", CommandOutput::ok("Done in 0.42s."))
    }

    /// Make a tool available and report `version` for `--version`
    pub fn tool(mut self, command: &str, version: &str) -> Self {
        self.available.insert(command.to_string());
        self.responses.insert(
            format!("{} --version", command),
            CommandOutput::ok(format!("{}\n", version)),
        );
        self
    }

    /// Remove a tool from PATH
    pub fn without(mut self, command: &str) -> Self {
        self.available.remove(command);
        self
    }

    /// Set the response for a full command line
    pub fn respond(mut self, line: &str, output: CommandOutput) -> Self {
        self.responses.insert(line.to_string(), output);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.invocations().iter().map(Invocation::line).collect()
    }

    pub fn was_called(&self, line: &str) -> bool {
        self.lines().iter().any(|l| l == line)
    }
}

impl CommandRunner for MockRunner {
    fn is_available(&self, program: &str) -> bool {
        self.available.contains(program)
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> std::io::Result<CommandOutput> {
        let invocation = Invocation {
            command: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.map(Utf8Path::to_owned),
        };
        let line = invocation.line();
        self.invocations.borrow_mut().push(invocation);

        self.responses.get(&line).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("unscripted: {}", line))
        })
    }
}

/// Inspector returning a fixed remote listing
pub struct StaticInspector {
    lines: Vec<String>,
    calls: RefCell<usize>,
}

impl StaticInspector {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            calls: RefCell::new(0),
        }
    }

    /// Listing of a genuine template clone
    pub fn template_clone() -> Self {
        Self::new(&[
            "origin\thttps://github.com/getspooky/CookieScript.git (fetch)",
            "origin\thttps://github.com/getspooky/CookieScript.git (push)",
        ])
    }

    /// Listing of an unrelated repository
    pub fn foreign_clone() -> Self {
        Self::new(&["origin https://github.com/someone/other.git (fetch)"])
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl RepositoryInspector for StaticInspector {
    fn remote_lines(&self) -> Result<Vec<String>> {
        *self.calls.borrow_mut() += 1;
        Ok(self.lines.clone())
    }
}

/// Temporary project directory populated with `files` (relative paths)
pub struct Fixture {
    _temp: TempDir,
    pub dir: Utf8PathBuf,
}

impl Fixture {
    pub fn new(name: &str, files: &[&str]) -> Self {
        let temp = TempDir::new().unwrap();
        let root = Utf8Path::from_path(temp.path()).unwrap().join(name);
        fs::create_dir_all(&root).unwrap();
        for file in files {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, format!("contents of {}", file)).unwrap();
        }
        Self {
            _temp: temp,
            dir: root,
        }
    }

    /// Relative paths of every file below the fixture root, sorted
    pub fn files(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(&self.dir, &self.dir, &mut out);
        out.sort();
        out
    }
}

fn collect(root: &Utf8Path, dir: &Utf8Path, out: &mut Vec<String>) {
    for entry in dir.read_dir_utf8().unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.is_dir() {
            collect(root, path, out);
        } else {
            out.push(path.strip_prefix(root).unwrap().as_str().replace('\\', "/"));
        }
    }
}
