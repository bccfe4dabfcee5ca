//! Process execution
//!
//! Runs the external toolchain and captures its merged output.

pub mod output;
pub mod runner;

pub use runner::{ProcessRunner, ShellRunner};
