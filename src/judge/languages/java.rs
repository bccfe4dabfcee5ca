use crate::config::settings::CompilerSettings;
use crate::config::types::{CompilationResult, Result, ToolchainHandle};
use crate::exec::runner::{ProcessRunner, ShellRunner};
use crate::judge::compiler::{artifact_path, judge_output, TestCompiler};
use crate::toolchain::classpath::ClasspathBuilder;
use crate::toolchain::locator::{platform_binary_name, DirectoryWalkLocator, ToolchainLocator};
use std::path::Path;

/// Compiler binary looked up under the JDK home
pub const COMPILER_BINARY: &str = "javac";
const SOURCE_EXTENSION: &str = ".java";
const ARTIFACT_EXTENSION: &str = ".class";

/// Compiles generated JUnit tests with the `javac` found under a JDK home.
pub struct JavaTestCompiler {
    javac: ToolchainHandle,
    classpath: ClasspathBuilder,
    runner: Box<dyn ProcessRunner>,
}

impl std::fmt::Debug for JavaTestCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaTestCompiler")
            .field("javac", &self.javac)
            .field("classpath", &self.classpath)
            .finish_non_exhaustive()
    }
}

impl JavaTestCompiler {
    pub fn new(lib_paths: &[String], junit_paths: &[String], java_home: &Path) -> Result<Self> {
        Self::with_parts(
            lib_paths,
            junit_paths,
            java_home,
            &DirectoryWalkLocator,
            Box::new(ShellRunner::default()),
        )
    }

    pub fn from_settings(settings: &CompilerSettings) -> Result<Self> {
        settings.validate()?;
        let java_home = settings.resolve_java_home()?;
        Self::with_parts(
            &settings.lib_paths,
            &settings.junit_paths,
            &java_home,
            &DirectoryWalkLocator,
            Box::new(ShellRunner::new(settings.timeout())),
        )
    }

    /// Construct with an injected locator and runner
    pub fn with_parts(
        lib_paths: &[String],
        junit_paths: &[String],
        java_home: &Path,
        locator: &dyn ToolchainLocator,
        runner: Box<dyn ProcessRunner>,
    ) -> Result<Self> {
        let javac = locator.locate(java_home, &platform_binary_name(COMPILER_BINARY))?;

        Ok(Self {
            javac,
            classpath: ClasspathBuilder::new(lib_paths, junit_paths),
            runner,
        })
    }

    pub fn javac(&self) -> &ToolchainHandle {
        &self.javac
    }

    /// Token list handed to the runner for one source file
    pub fn compile_command(&self, path: &Path, project_build_path: &str) -> Vec<String> {
        // No -d: javac writes the class file next to the source
        vec![
            quote(&self.javac.path().to_string_lossy()),
            "-cp".to_string(),
            quote(&self.get_class_paths(project_build_path)),
            quote(&path.to_string_lossy()),
        ]
    }
}

impl TestCompiler for JavaTestCompiler {
    fn language(&self) -> &'static str {
        "java"
    }

    fn compile_code(
        &self,
        path: &Path,
        project_build_path: &str,
        working_dir: &Path,
    ) -> Result<CompilationResult> {
        let command = self.compile_command(path, project_build_path);
        let working_dir = (!working_dir.as_os_str().is_empty()).then_some(working_dir);

        let output = self.runner.run(&command, working_dir)?;

        // Relative sources resolve against the directory javac ran in
        let mut class_file = artifact_path(path, SOURCE_EXTENSION, ARTIFACT_EXTENSION);
        if let Some(dir) = working_dir.filter(|_| class_file.is_relative()) {
            class_file = dir.join(class_file);
        }
        Ok(judge_output(&class_file, output))
    }

    fn get_class_paths(&self, build_path: &str) -> String {
        self.classpath.build(build_path)
    }
}

/// Quote a single token for the platform shell
fn quote(token: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", token)
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
