//! Compose command construction

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Subcommand that gets `-d` appended
const UP: &str = "up";

/// Detach flag for `docker compose up`
const DETACH: &str = "-d";

/// One `docker compose -f <file> <args...>` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    file: PathBuf,
    args: Vec<String>,
}

impl ComposeInvocation {
    /// Build an invocation, appending `-d` when the first argument is `up`
    pub fn new(file: impl Into<PathBuf>, forwarded: &[String]) -> Self {
        let mut args = forwarded.to_vec();
        if args.first().map(String::as_str) == Some(UP) {
            args.push(DETACH.to_string());
        }
        Self {
            file: file.into(),
            args,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Arguments after `-f <file>`
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full argument vector passed to the docker binary
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec!["compose".into(), "-f".into(), self.file.clone().into()];
        argv.extend(self.args.iter().map(OsString::from));
        argv
    }

    /// Human-readable command line
    pub fn command_line(&self, docker: &str) -> String {
        let mut line = format!("{} compose -f {}", docker, self.file.display());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
