//! Test compilers.
//!
//! The orchestration contract is language-agnostic. Each language variant
//! supplies its binary name, artifact extension and argument list.

pub mod compiler;
pub mod languages;
pub mod registry;

pub use compiler::TestCompiler;
pub use languages::java::JavaTestCompiler;
pub use registry::compiler_for;
