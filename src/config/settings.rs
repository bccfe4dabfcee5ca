/// Compiler settings loading from a JSON file
use crate::config::types::{CompilerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_LANGUAGE: &str = "java";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Construction-time configuration for a test compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// Source language of the generated tests
    pub language: String,
    /// Toolchain home searched for the compiler binary
    pub java_home: Option<PathBuf>,
    /// Project library classpath roots
    pub lib_paths: Vec<String>,
    /// Test framework (JUnit) classpath roots
    pub junit_paths: Vec<String>,
    /// Wall time limit for one compiler invocation
    pub timeout_seconds: u64,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            java_home: None,
            lib_paths: Vec::new(),
            junit_paths: Vec::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl CompilerSettings {
    /// Load settings from a JSON file; absent fields keep their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CompilerError::Config(format!(
                "Failed to read settings file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(content)
            .map_err(|e| CompilerError::Config(format!("Failed to parse settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no compiler invocation could work with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(CompilerError::Config(
                "timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Toolchain home, falling back to `JAVA_HOME` from the environment
    pub fn resolve_java_home(&self) -> Result<PathBuf> {
        if let Some(home) = &self.java_home {
            return Ok(home.clone());
        }

        match std::env::var_os("JAVA_HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => Err(CompilerError::Config(
                "No toolchain home configured: set java_home or JAVA_HOME".to_string(),
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = CompilerSettings::from_json(r#"{"lib_paths": ["lib/a.jar"]}"#).unwrap();
        assert_eq!(settings.language, "java");
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(settings.lib_paths, vec!["lib/a.jar".to_string()]);
        assert!(settings.junit_paths.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CompilerSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CompilerError::Config(_)));
    }

    #[test]
    fn test_explicit_java_home_wins() {
        let settings = CompilerSettings {
            java_home: Some(PathBuf::from("/opt/jdk11")),
            ..CompilerSettings::default()
        };
        assert_eq!(
            settings.resolve_java_home().unwrap(),
            PathBuf::from("/opt/jdk11")
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = CompilerSettings::from_json(r#"{"timeout_seconds": 0}"#).unwrap_err();
        assert!(matches!(err, CompilerError::Config(_)));
        assert!(err.to_string().contains("timeout_seconds"));

        let settings = CompilerSettings {
            timeout_seconds: 0,
            ..CompilerSettings::default()
        };
        assert!(settings.validate().is_err());
        assert!(CompilerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_missing_settings_file() {
        let err = CompilerSettings::load_from_file("/nonexistent/gencheck.json").unwrap_err();
        assert!(err.to_string().contains("gencheck.json"));
    }
}
