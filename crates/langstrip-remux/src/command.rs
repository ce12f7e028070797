//! Builder for running the remuxer with streamed output.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::settings::StderrPolicy;
use crate::tools::tool_name;
use crate::{Error, Result};

/// Output captured from a tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8). Always empty under
    /// [`StderrPolicy::Fatal`] since any stderr output fails the run.
    pub stderr: String,
}

/// A builder for constructing and executing one remuxer invocation.
///
/// Standard output is forwarded line by line to the log while the process
/// runs. Standard error is handled according to the [`StderrPolicy`].
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    stderr_policy: StderrPolicy,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stderr_policy: StderrPolicy::default(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<OsString>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<OsString>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set how stderr output is treated.
    pub fn stderr_policy(&mut self, policy: StderrPolicy) -> &mut Self {
        self.stderr_policy = policy;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Shell-like rendering for logs and dry runs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().to_string()];
        parts.extend(self.args.iter().map(|a| {
            let a = a.to_string_lossy();
            if a.contains(char::is_whitespace) {
                format!("\"{a}\"")
            } else {
                a.to_string()
            }
        }));
        parts.join(" ")
    }

    /// Run the process to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolNotFound`] if the program cannot be spawned because it
    ///   does not exist.
    /// - [`Error::ToolFailed`] if the process writes to stderr under
    ///   [`StderrPolicy::Fatal`] (the process is killed), exits with a
    ///   non-zero status, or cannot be spawned or awaited.
    pub async fn execute(&self) -> Result<ToolOutput> {
        let tool = tool_name(&self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(&tool)
                } else {
                    Error::tool_failed(&tool, format!("failed to spawn: {e}"))
                }
            })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(Error::tool_failed(&tool, "output pipes were not captured"));
        };

        let stdout_task = tokio::spawn(forward_stdout(tool.clone(), stdout));

        let mut reader = BufReader::new(stderr);
        let mut buf = Vec::new();
        let mut stderr_text = String::new();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| Error::tool_failed(&tool, format!("failed to read stderr: {e}")))?;
            if n == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end();

            match self.stderr_policy {
                StderrPolicy::Fatal => {
                    tracing::error!("{tool} error: {line}");
                    if let Err(e) = child.kill().await {
                        tracing::warn!("Failed to kill {tool}: {e}");
                    }
                    stdout_task.abort();
                    return Err(Error::tool_failed(
                        &tool,
                        format!("wrote to its error stream: {line}"),
                    ));
                }
                StderrPolicy::Warn => {
                    tracing::warn!("{tool} error: {line}");
                    stderr_text.push_str(line);
                    stderr_text.push('\n');
                }
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| Error::tool_failed(&tool, format!("I/O error waiting for process: {e}")))?;

        let stdout_text = match stdout_task.await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(Error::tool_failed(&tool, format!("failed to read stdout: {e}"))),
            Err(e) => return Err(Error::tool_failed(&tool, format!("stdout reader failed: {e}"))),
        };

        let output = ToolOutput {
            code: status.code(),
            stdout: stdout_text,
            stderr: stderr_text,
        };

        if status.success() {
            return Ok(output);
        }

        let message = if output.stderr.trim().is_empty() {
            status.to_string()
        } else {
            output.stderr.trim().to_string()
        };
        Err(Error::tool_exited(tool, output.code, message))
    }
}

async fn forward_stdout(tool: String, stdout: impl AsyncRead + Unpin) -> std::io::Result<String> {
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(text);
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end();
        tracing::info!("{tool} output: {line}");
        text.push_str(line);
        text.push('\n');
    }
}
