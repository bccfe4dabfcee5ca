//! Binary-level checks: exit codes and JSON output of the gencheck CLI

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;

fn gencheck() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gencheck"));
    cmd.env_remove("JAVA_HOME");
    cmd
}

fn fake_jdk() -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    let bin = home.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let javac = bin.join("javac");
    fs::write(
        &javac,
        "#!/bin/sh\nif grep -q missing \"$3\"; then echo \"$3:1: error: cannot find symbol\" >&2; exit 1; fi\ntouch \"${3%.java}.class\"\n",
    )
    .unwrap();
    fs::set_permissions(&javac, fs::Permissions::from_mode(0o755)).unwrap();
    home
}

#[test]
fn test_classpath_command_prints_joined_roots() {
    let output = gencheck()
        .args(["classpath", "--lib", "a.jar", "--junit", "junit.jar", "--build-path", "out"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a.jar:junit.jar:out\n");
}

#[test]
fn test_compile_command_emits_verdict_json() {
    let jdk = fake_jdk();
    let work = tempfile::tempdir().unwrap();
    let good = work.path().join("FooTest.java");
    let bad = work.path().join("BarTest.java");
    fs::write(&good, "class FooTest {}\n").unwrap();
    fs::write(&bad, "class BarTest { missing m; }\n").unwrap();

    let output = gencheck()
        .arg("compile")
        .arg(&good)
        .arg("--java-home")
        .arg(jdk.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let verdict: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verdict["success"], true);
    assert_eq!(verdict["diagnostics"], "");

    let output = gencheck()
        .arg("compile")
        .arg(&bad)
        .arg("--java-home")
        .arg(jdk.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let verdict: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verdict["success"], false);
    assert!(verdict["diagnostics"]
        .as_str()
        .unwrap()
        .contains("cannot find symbol"));
}

#[test]
fn test_missing_toolchain_exits_with_usage_code() {
    let empty = tempfile::tempdir().unwrap();
    let output = gencheck()
        .args(["compile", "Foo.java", "--java-home"])
        .arg(empty.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot find compiler"));
}

#[test]
fn test_missing_java_home_is_config_error() {
    let output = gencheck().args(["locate"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("JAVA_HOME"));
}

#[test]
fn test_zero_timeout_is_usage_error() {
    let output = gencheck()
        .args(["classpath", "--timeout", "0"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("timeout_seconds"));
}
