//! gencheck: compilation checker for generated test sources
//!
//! Given a generated test file and its classpath roots, gencheck locates the
//! compiler toolchain, runs it as an external process and decides whether the
//! file compiled.
//!
//! # Architecture
//!
//! ## Toolchain ([`toolchain`])
//! - [`toolchain::locator`]: Recursive search for the compiler binary
//! - [`toolchain::classpath`]: Platform classpath assembly
//!
//! ## Execution ([`exec`])
//! - [`exec::runner`]: Shell invocation with wall-time limit and process-group kill
//! - [`exec::output`]: Bounded stdout/stderr collection
//!
//! ## Compilers ([`judge`])
//! - [`judge::compiler`]: Language-agnostic contract and verdict rule
//! - [`judge::languages`]: Per-language variants (Java)
//! - [`judge::registry`]: Language name to compiler
//!
//! ## Configuration ([`config`])
//! - [`config::settings`]: JSON settings and `JAVA_HOME` fallback
//! - [`config::types`]: Result types and the error taxonomy
//!
//! A compile verdict is positive only when the expected artifact exists and
//! the toolchain printed nothing. Toolchain problems (missing binary, launch
//! failure, timeout) are errors; a test that fails to compile is data.

// Toolchain resolution
pub mod toolchain;

// Process execution
pub mod exec;

// Language-specific test compilers
pub mod judge;

// Configuration & shared types
pub mod config;

// CLI entrypoint wiring for the gencheck binary
pub mod cli;

pub use config::settings::CompilerSettings;
pub use config::types::*;
pub use judge::{compiler_for, JavaTestCompiler, TestCompiler};
