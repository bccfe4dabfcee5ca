use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::settings::CompilerSettings;
use crate::config::types::CompilerError;
use crate::judge::registry::{compiler_binary_for, compiler_for};
use crate::toolchain::locator::{DirectoryWalkLocator, ToolchainLocator};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by every command; flags override the settings file
#[derive(Args, Clone, Debug)]
struct SettingsArgs {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Test language (default: java)
    #[arg(long)]
    language: Option<String>,
    /// Toolchain home searched for the compiler (default: $JAVA_HOME)
    #[arg(long)]
    java_home: Option<PathBuf>,
    /// Library classpath root (repeatable)
    #[arg(long = "lib", value_name = "PATH")]
    lib_paths: Vec<String>,
    /// Test framework classpath root (repeatable)
    #[arg(long = "junit", value_name = "PATH")]
    junit_paths: Vec<String>,
    /// Wall time limit per compiler invocation in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl SettingsArgs {
    fn resolve(&self) -> crate::config::types::Result<CompilerSettings> {
        let mut settings = match &self.config {
            Some(path) => CompilerSettings::load_from_file(path)?,
            None => CompilerSettings::default(),
        };

        if let Some(language) = &self.language {
            settings.language = language.clone();
        }
        if let Some(home) = &self.java_home {
            settings.java_home = Some(home.clone());
        }
        if !self.lib_paths.is_empty() {
            settings.lib_paths = self.lib_paths.clone();
        }
        if !self.junit_paths.is_empty() {
            settings.junit_paths = self.junit_paths.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_seconds = timeout;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one generated test file and print the verdict as JSON
    Compile {
        /// Generated test source file
        source: PathBuf,
        /// Project build output appended to the classpath
        #[arg(long, default_value = "")]
        build_path: String,
        /// Directory the compiler runs in
        #[arg(long)]
        working_dir: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Compile every file of a generated suite and print the batch verdict
    CompileSuite {
        /// Generated test source files
        #[arg(required = true)]
        sources: Vec<PathBuf>,
        #[arg(long, default_value = "")]
        build_path: String,
        #[arg(long)]
        working_dir: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print the classpath that would be passed to the compiler
    Classpath {
        #[arg(long, default_value = "")]
        build_path: String,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print the compiler binary resolved under the toolchain home
    Locate {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Run one command; the returned value is the process exit code
fn execute(command: Commands) -> std::result::Result<i32, CompilerError> {
    match command {
        Commands::Compile {
            source,
            build_path,
            working_dir,
            settings,
        } => {
            let compiler = compiler_for(&settings.resolve()?)?;
            let working_dir = working_dir_or_inherit(&working_dir);
            let result = compiler.compile_code(&source, &build_path, working_dir)?;
            print_json(&result)?;
            Ok(if result.success { 0 } else { 1 })
        }
        Commands::CompileSuite {
            sources,
            build_path,
            working_dir,
            settings,
        } => {
            let compiler = compiler_for(&settings.resolve()?)?;
            let working_dir = working_dir_or_inherit(&working_dir);
            let batch = compiler.compile_test_cases(&sources, &build_path, working_dir)?;
            print_json(&batch)?;
            Ok(if batch.all_compilable { 0 } else { 1 })
        }
        Commands::Classpath {
            build_path,
            settings,
        } => {
            // Classpath assembly does not depend on the toolchain
            let settings = settings.resolve()?;
            let builder = crate::toolchain::ClasspathBuilder::new(
                &settings.lib_paths,
                &settings.junit_paths,
            );
            println!("{}", builder.build(&build_path));
            Ok(0)
        }
        Commands::Locate { settings } => {
            let settings = settings.resolve()?;
            let binary = compiler_binary_for(&settings.language)?;
            let home = settings.resolve_java_home()?;
            let handle = DirectoryWalkLocator.locate(&home, &binary)?;
            println!("{}", handle.path().display());
            Ok(0)
        }
    }
}

/// An empty path makes the compiler inherit the current directory
fn working_dir_or_inherit(dir: &Option<PathBuf>) -> &Path {
    dir.as_deref().unwrap_or(Path::new(""))
}

fn print_json<T: serde::Serialize>(value: &T) -> std::result::Result<(), CompilerError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CompilerError::Config(format!("Failed to serialize result: {}", e)))?;
    println!("{}", json);
    Ok(())
}
