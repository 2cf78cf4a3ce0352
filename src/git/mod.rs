//! Core pipeline around the external `git` binary.
//!
//! help     -> SectionPolicy + parse_help (pure text -> Operation list)
//! catalog  -> Operation / extract_catalog (runs `git help -a`)
//! executor -> ExecutionResult / execute (runs `git <token> <args>`)
//!
use std::fmt;
use std::process::ExitStatus;

use thiserror::Error;

pub mod catalog;
pub mod executor;
pub mod help;

pub use catalog::{Operation, extract_catalog};
pub use executor::{ExecutionResult, execute};

/// Prefix carried by every externally visible operation id (`git-add`, `git-log`, ...).
pub const ID_PREFIX: &str = "git-";

/// Literal prefix some git releases print in front of listed subcommands.
pub const SUBCOMMAND_PREFIX: &str = "git-";

/// Platform default executable name.
#[cfg(windows)]
pub const DEFAULT_PROGRAM: &str = "git.exe";
#[cfg(not(windows))]
pub const DEFAULT_PROGRAM: &str = "git";

/// Handle on the external git binary (just its program path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitTool {
    program: String,
}

impl GitTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Display name used in capability descriptions ("git", regardless of path / suffix).
    pub fn display_name(&self) -> &'static str {
        "git"
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl fmt::Display for GitTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)
    }
}

/// Failure to build the command catalog from git's help output.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to run '{program} help -a': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program} help -a' failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("no commands found in '{program} help -a' output")]
    Empty { program: String },
}
