//! CLI support for rugo
//!
//! Provides programmatic access to the `rugo` subcommands so they can be
//! driven from tests or other tools without spawning the binary.

mod build;
mod dump;

pub use build::{execute_build, BuildOptions};
pub use dump::{execute_dump, node_to_json, tokens_to_json, DumpOptions, Stage};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Input file read when no path is given and stdin is a terminal.
pub const DEFAULT_INPUT: &str = "expr.s";

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Lexing, parsing or transpiling failed
    #[error(transparent)]
    Compile(#[from] crate::CompileError),

    /// Input file could not be read
    #[error("cannot read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Output file could not be written
    #[error("cannot write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Compile(e.into())
    }
}

/// Reads S-expression source from `path`.
pub fn read_source(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes generated text to `path`.
pub fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
