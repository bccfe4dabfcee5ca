/// Core types shared by the locator, runner and compiler layers
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Absolute path to a verified compiler binary.
///
/// Only produced by a successful toolchain search, so holding one means the
/// binary existed as a regular file when the compiler was constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolchainHandle {
    path: PathBuf,
}

impl ToolchainHandle {
    /// Wrap a path a locator has already checked to be a regular file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Verdict of a single compile invocation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationResult {
    /// Artifact exists and the toolchain printed nothing
    pub success: bool,
    /// Raw toolchain output, verbatim
    pub diagnostics: String,
}

impl CompilationResult {
    pub fn passed() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Aggregate verdict for a generated suite compiled file by file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCompilationResult {
    /// True only when every file compiled
    pub all_compilable: bool,
    /// Sources that compiled, in input order
    pub compilable: Vec<PathBuf>,
    /// Sources that failed, with their diagnostics
    pub failures: Vec<CompileFailure>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileFailure {
    pub source: PathBuf,
    pub diagnostics: String,
}

/// Captured output of an external process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout followed by stderr
    pub output: String,
    /// None when terminated by a signal
    pub exit_code: Option<i32>,
}

/// Error types for toolchain resolution and process execution
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Cannot find compiler '{binary}' under {}", .root.display())]
    ToolchainNotFound { root: PathBuf, binary: String },

    #[error("Failed to launch process: {0}")]
    ProcessLaunch(String),

    #[error("Process exceeded wall time limit of {limit:?} and was killed")]
    Timeout { limit: Duration },

    /// The process exited but its output streams stayed open; `partial` is
    /// what was read before the drain timeout
    #[error("Process output still open {limit:?} after exit; verdict withheld")]
    OutputIncomplete { limit: Duration, partial: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompilerError {
    /// Process exit code used by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CompilerError::ToolchainNotFound { .. } => 2,
            CompilerError::ProcessLaunch(_) => 2,
            CompilerError::Timeout { .. } => 3,
            CompilerError::OutputIncomplete { .. } => 3,
            CompilerError::Config(_) => 2,
            CompilerError::Io(_) => 74,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
