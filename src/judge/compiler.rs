use crate::config::types::{
    BatchCompilationResult, CompilationResult, CompileFailure, ProcessOutput, Result,
};
use std::path::{Path, PathBuf};

/// Compiler contract for one source language of generated tests.
///
/// `Err` is reserved for problems with the toolchain itself (launch failure,
/// timeout, I/O). A test that does not compile is `Ok` with `success: false`.
pub trait TestCompiler: std::fmt::Debug + Send + Sync {
    fn language(&self) -> &'static str;

    fn compile_code(
        &self,
        path: &Path,
        project_build_path: &str,
        working_dir: &Path,
    ) -> Result<CompilationResult>;

    fn get_class_paths(&self, build_path: &str) -> String;

    /// Compile every file of a generated suite in order.
    fn compile_test_cases(
        &self,
        paths: &[PathBuf],
        project_build_path: &str,
        working_dir: &Path,
    ) -> Result<BatchCompilationResult> {
        let mut batch = BatchCompilationResult {
            all_compilable: true,
            ..BatchCompilationResult::default()
        };

        for path in paths {
            let result = self.compile_code(path, project_build_path, working_dir)?;
            if result.success {
                batch.compilable.push(path.clone());
            } else {
                batch.all_compilable = false;
                batch.failures.push(CompileFailure {
                    source: path.clone(),
                    diagnostics: result.diagnostics,
                });
            }
        }

        Ok(batch)
    }
}

/// Replace `source_ext` at the end of the path with `artifact_ext`.
///
/// A path without the source extension keeps its full name and gets the
/// artifact extension appended.
pub fn artifact_path(source: &Path, source_ext: &str, artifact_ext: &str) -> PathBuf {
    let raw: &str = &source.to_string_lossy();
    let stem = raw.strip_suffix(source_ext).unwrap_or(raw);
    PathBuf::from(format!("{}{}", stem, artifact_ext))
}

/// Success only when the artifact exists and nothing was printed.
///
/// Warnings count as diagnostics, so a file that compiles with warnings is
/// reported as failed. The exit code is logged but never consulted.
pub fn judge_output(artifact: &Path, output: ProcessOutput) -> CompilationResult {
    let artifact_exists = artifact.is_file();
    log::info!(
        "Compiler output (exit {:?}, artifact {}): '{}'",
        output.exit_code,
        if artifact_exists { "present" } else { "missing" },
        output.output
    );

    CompilationResult {
        success: artifact_exists && output.output.trim().is_empty(),
        diagnostics: output.output,
    }
}
