/// External process execution with merged output capture and a wall limit
use crate::config::settings::DEFAULT_TIMEOUT_SECONDS;
use crate::config::types::{CompilerError, ProcessOutput, Result};
use crate::exec::output::{OutputCollector, OutputLimits};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Exit codes the shell itself uses for "not found" and "not executable"
#[cfg(windows)]
const SHELL_LAUNCH_FAILURE_CODES: &[i32] = &[9009];
#[cfg(not(windows))]
const SHELL_LAUNCH_FAILURE_CODES: &[i32] = &[126, 127];

/// Runs a command line and returns its textual output.
///
/// Implementations do not judge the output. A command that could not be
/// started at all is an error, never an `Ok` with diagnostics.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &[String], working_dir: Option<&Path>) -> Result<ProcessOutput>;
}

/// Runs the tokens through the platform shell.
///
/// Tokens are joined with single spaces and handed to `sh -c` (`cmd /C` on
/// Windows) as-is. Callers quote tokens that contain whitespace.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
    poll_interval: Duration,
    limits: OutputLimits,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: Duration::from_millis(10),
            limits: OutputLimits::default(),
        }
    }

    pub fn with_output_limits(mut self, limits: OutputLimits) -> Self {
        self.limits = limits;
        self
    }

    fn shell_command(line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
    }
}

impl ProcessRunner for ShellRunner {
    fn run(&self, command: &[String], working_dir: Option<&Path>) -> Result<ProcessOutput> {
        if command.is_empty() {
            return Err(CompilerError::ProcessLaunch("empty command".to_string()));
        }

        let line = command.join(" ");
        log::debug!("Running: {}", line);

        let mut cmd = Self::shell_command(&line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        // Own group, so a kill reaches everything the shell started
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| CompilerError::ProcessLaunch(format!("{}: {}", line, e)))?;

        let collector =
            OutputCollector::start(self.limits.clone(), child.stdout.take(), child.stderr.take());

        let started = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if started.elapsed() > self.timeout {
                        log::warn!(
                            "Killing process after {:?} wall time: {}",
                            self.timeout,
                            line
                        );
                        kill_process_tree(&mut child);
                        let _ = child.wait();
                        let _ = collector.finish();
                        return Err(CompilerError::Timeout {
                            limit: self.timeout,
                        });
                    }
                    thread::sleep(self.poll_interval);
                }
                Err(e) => {
                    kill_process_tree(&mut child);
                    let _ = child.wait();
                    let _ = collector.finish();
                    return Err(CompilerError::Io(e));
                }
            }
        };

        let collected = collector.finish();
        if !collected.complete {
            log::warn!(
                "Output of '{}' still open {:?} after exit, killing its process group",
                line,
                self.limits.drain_timeout
            );
            kill_process_tree(&mut child);
            return Err(CompilerError::OutputIncomplete {
                limit: self.limits.drain_timeout,
                partial: collected.output,
            });
        }

        let output = collected.output;
        if let Some(code) = status.code().filter(|c| SHELL_LAUNCH_FAILURE_CODES.contains(c)) {
            return Err(CompilerError::ProcessLaunch(format!(
                "shell could not start command (exit {}): {}",
                code,
                output.trim()
            )));
        }

        Ok(ProcessOutput {
            output,
            exit_code: status.code(),
        })
    }
}

/// SIGKILL the child's process group, falling back to the child alone
#[cfg(unix)]
fn kill_process_tree(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let pgid = Pid::from_raw(child.id() as i32);
    if let Err(e) = killpg(pgid, Signal::SIGKILL) {
        log::debug!("killpg({}) failed: {}", pgid, e);
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_process_tree(child: &mut Child) {
    let _ = child.kill();
}
