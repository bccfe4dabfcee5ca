/// Compiler binary discovery under a toolchain home directory
use crate::config::types::{CompilerError, Result, ToolchainHandle};
use std::path::Path;
use walkdir::WalkDir;

/// Resolves a compiler binary by name beneath a root directory
pub trait ToolchainLocator: Send + Sync {
    fn locate(&self, root: &Path, binary_name: &str) -> Result<ToolchainHandle>;
}

/// Default locator: recursive walk, first regular file with a matching name.
///
/// Traversal order follows the directory listing order of the host
/// filesystem, so with several matching binaries under one root the chosen
/// one is not guaranteed to be stable across platforms.
#[derive(Debug, Clone, Default)]
pub struct DirectoryWalkLocator;

impl ToolchainLocator for DirectoryWalkLocator {
    fn locate(&self, root: &Path, binary_name: &str) -> Result<ToolchainHandle> {
        let found = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == binary_name);

        match found {
            Some(entry) => {
                let path = std::path::absolute(entry.path())?;
                log::debug!("Resolved compiler '{}' at {}", binary_name, path.display());
                Ok(ToolchainHandle::new(path))
            }
            None => {
                log::error!(
                    "Cannot find compiler '{}' at {}",
                    binary_name,
                    root.display()
                );
                Err(CompilerError::ToolchainNotFound {
                    root: root.to_path_buf(),
                    binary: binary_name.to_string(),
                })
            }
        }
    }
}

/// Platform executable name for a compiler (`javac` / `javac.exe`)
pub fn platform_binary_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", base)
    } else {
        base.to_string()
    }
}
