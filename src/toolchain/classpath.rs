/// Classpath assembly from library, framework and build output roots

/// Platform classpath separator
#[cfg(windows)]
pub const CLASSPATH_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const CLASSPATH_SEPARATOR: char = ':';

/// Joins classpath roots into a single toolchain argument.
///
/// The common prefix (library roots then framework roots) is fixed at
/// construction. Each build path is appended to it, never substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathBuilder {
    separator: char,
    common_path: String,
}

impl ClasspathBuilder {
    pub fn new(lib_paths: &[String], junit_paths: &[String]) -> Self {
        Self::with_separator(lib_paths, junit_paths, CLASSPATH_SEPARATOR)
    }

    pub fn with_separator(lib_paths: &[String], junit_paths: &[String], separator: char) -> Self {
        let mut common_path = String::new();
        for root in lib_paths.iter().chain(junit_paths.iter()) {
            common_path.push_str(root);
            common_path.push(separator);
        }

        Self {
            separator,
            common_path,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Prefix shared by every classpath this builder produces
    pub fn common_path(&self) -> &str {
        &self.common_path
    }

    /// Common prefix plus `build_path`, without a trailing separator
    pub fn build(&self, build_path: &str) -> String {
        let mut path = String::with_capacity(self.common_path.len() + build_path.len());
        path.push_str(&self.common_path);
        path.push_str(build_path);

        path.trim_end_matches(self.separator).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_order_is_libs_then_junit_then_build() {
        let builder = ClasspathBuilder::with_separator(
            &roots(&["lib/a.jar", "lib/b.jar"]),
            &roots(&["junit.jar"]),
            ':',
        );
        assert_eq!(
            builder.build("target/classes"),
            "lib/a.jar:lib/b.jar:junit.jar:target/classes"
        );
    }

    #[test]
    fn test_empty_roots_yield_empty_string() {
        let builder = ClasspathBuilder::with_separator(&[], &[], ':');
        assert_eq!(builder.build(""), "");
    }

    #[test]
    fn test_empty_build_path_strips_separator() {
        let builder = ClasspathBuilder::with_separator(&roots(&["lib/a.jar"]), &[], ':');
        assert_eq!(builder.build(""), "lib/a.jar");
    }

    #[test]
    fn test_build_path_trailing_separators_stripped() {
        let builder = ClasspathBuilder::with_separator(&roots(&["a"]), &roots(&["b"]), ';');
        assert_eq!(builder.build("out;;"), "a;b;out");
    }

    #[test]
    fn test_never_ends_with_separator() {
        let cases: [(&[&str], &[&str], &str); 5] = [
            (&[], &[], ""),
            (&["a"], &[], ""),
            (&[], &["j"], "b:"),
            (&["a:", "b"], &["j:"], ":"),
            (&["x"], &["y"], "z"),
        ];
        for (libs, junit, build) in cases {
            let builder = ClasspathBuilder::with_separator(&roots(libs), &roots(junit), ':');
            let classpath = builder.build(build);
            assert!(
                !classpath.ends_with(':'),
                "{:?} + {:?} + {:?} -> {:?}",
                libs,
                junit,
                build,
                classpath
            );
        }
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let builder = ClasspathBuilder::with_separator(&roots(&["a", "a"]), &roots(&["a"]), ':');
        assert_eq!(builder.build("a"), "a:a:a:a");
    }

    #[test]
    fn test_default_separator_matches_platform() {
        let builder = ClasspathBuilder::new(&roots(&["a"]), &[]);
        assert_eq!(builder.separator(), CLASSPATH_SEPARATOR);
        assert_eq!(builder.common_path(), format!("a{}", CLASSPATH_SEPARATOR));
    }
}
