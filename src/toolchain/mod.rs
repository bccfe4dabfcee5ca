//! Toolchain resolution
//!
//! Locates the compiler binary under a toolchain home and assembles the
//! classpath passed to it.

pub mod classpath;
pub mod locator;

pub use classpath::{ClasspathBuilder, CLASSPATH_SEPARATOR};
pub use locator::{platform_binary_name, DirectoryWalkLocator, ToolchainLocator};
