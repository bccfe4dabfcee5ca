use crate::config::settings::CompilerSettings;
use crate::config::types::{CompilerError, Result};
use crate::judge::compiler::TestCompiler;
use crate::judge::languages::java::{self, JavaTestCompiler};
use crate::toolchain::locator::platform_binary_name;

/// Build the compiler for the configured test language
pub fn compiler_for(settings: &CompilerSettings) -> Result<Box<dyn TestCompiler>> {
    match settings.language.to_ascii_lowercase().as_str() {
        "java" => Ok(Box::new(JavaTestCompiler::from_settings(settings)?)),
        other => Err(unsupported(other)),
    }
}

/// File name of the compiler searched for under a language's toolchain home
pub fn compiler_binary_for(language: &str) -> Result<String> {
    match language.to_ascii_lowercase().as_str() {
        "java" => Ok(platform_binary_name(java::COMPILER_BINARY)),
        other => Err(unsupported(other)),
    }
}

fn unsupported(language: &str) -> CompilerError {
    CompilerError::Config(format!("unsupported test language: {language}"))
}
